use crate::Prepared;

/// Parameter markers tried, in order, when a map key does not match a declared name as is.
pub const PARAMETER_PREFIXES: [char; 3] = [':', '@', '$'];

/// Resolve `key` to the 1-based slot index of a named parameter.
///
/// Declared names keep their marker (`:id`, `@id`, `$id`), so the key is first looked up
/// verbatim and then with each prefix of [`PARAMETER_PREFIXES`].
pub fn resolve_parameter<P: Prepared + ?Sized>(statement: &P, key: &str) -> Option<u32> {
    if let Some(index) = statement.parameter_index(key) {
        return Some(index);
    }
    let mut name = String::with_capacity(key.len() + 1);
    PARAMETER_PREFIXES.iter().find_map(|prefix| {
        name.clear();
        name.push(*prefix);
        name.push_str(key);
        statement.parameter_index(&name)
    })
}
