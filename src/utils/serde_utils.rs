// Clients sometimes send empty strings for fields they
// mean to leave out. We treat those as absent before
// defaults kick in, using a plain old function in the
// DTO conversion rather than a custom deserializer.
pub fn empty_string_to_none(value: Option<String>) -> Option<String> {
  match value {
    Some(s) => if s.trim().is_empty()
      { None } else { Some(s) },
    None => None
  }
}
