use std::fmt::{self, Display};

const TRUNCATE_AT: usize = 497;

/// Query text shortened for logs and error messages.
pub struct TruncateLong<'a>(&'a str);

/// Cut `query` around 500 bytes, on a character boundary.
pub fn truncate_long(query: &str) -> TruncateLong<'_> {
    TruncateLong(query)
}

impl Display for TruncateLong<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let query = self.0;
        if query.len() <= TRUNCATE_AT {
            return write!(f, "{}", query.trim_end());
        }
        let end = query
            .char_indices()
            .map(|(i, _)| i)
            .take_while(|i| *i <= TRUNCATE_AT)
            .last()
            .unwrap_or(0);
        write!(f, "{}...", query[..end].trim_end())
    }
}

#[cfg(test)]
mod tests {
    use super::truncate_long;

    #[test]
    fn short_query_untouched() {
        assert_eq!(truncate_long("SELECT ?  \n").to_string(), "SELECT ?");
    }

    #[test]
    fn long_query_cut_on_char_boundary() {
        let query = "é".repeat(400);
        let truncated = truncate_long(&query).to_string();
        assert!(truncated.ends_with("..."));
        assert!(truncated.len() <= 500);
    }
}
