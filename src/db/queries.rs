// Query building helpers. Only identifiers that come
// from enums or constants in this crate ever end up in
// the query string, values always go through prepared
// statement parameters.

// Bunch of enums for query building:
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Order {
  Asc,
  Desc
}

impl Order {

  pub fn keyword(&self) -> &'static str {
    match self {
      Order::Asc => "ASC",
      Order::Desc => "DESC"
    }
  }

}

pub struct OrderBy {
  pub order: Order,
  pub field: &'static str
}

impl OrderBy {
  pub fn new(order: Order, field: &'static str) -> Self {
    OrderBy {
      order,
      field
    }
  }
}

pub fn generate_field_equal_qmark(name: &str) -> String {
  format!("{} = ?", name)
}

// Decided to put "q_" in front of all args just
// because "where" is a reserved Rust keyword.
// WHERE clauses are stitched with AND only, which is
// all the listing queries ever need.
pub fn select_query_builder(
  q_fields: &[&str],
  q_from: &str,
  q_where: &[String],
  group_by: Option<&str>,
  q_order: Option<&OrderBy>,
  paginated: bool
) -> String {
  let mut query = format!(
    "SELECT {} FROM {} ",
    q_fields.join(","),
    q_from
  );
  if !q_where.is_empty() {
    query.push_str(
      &format!(
        "WHERE {} ",
        q_where.join(" AND ")
      )
    );
  }
  if let Some(group) = group_by {
    query.push_str(
      &format!(
        "GROUP BY {} ",
        group
      )
    );
  }
  if let Some(order) = q_order {
    query.push_str(
      &format!(
        "ORDER BY {} {} ",
        order.field,
        order.order.keyword()
      )
    );
  }
  if paginated {
    // The values are bound as parameters, in that order,
    // after any WHERE parameters.
    query.push_str("LIMIT ? OFFSET ? ");
  }
  query
}
