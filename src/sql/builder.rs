//! Query text for the student source. The base query and the active filter are operator configuration;
//! the only request-derived value (the registration number) is always bound as a parameter.

/// Configured query with surrounding whitespace and trailing semicolons removed.
pub fn base_query(students_query: &str) -> &str {
    let mut query = students_query.trim();
    while let Some(stripped) = query.strip_suffix(';') {
        query = stripped.trim_end();
    }
    query
}

/// Query for the list endpoints. The filter is appended on its own line only when requested and non-empty.
pub fn list_query(students_query: &str, active_where_clause: &str, active_only: bool) -> String {
    let base = base_query(students_query);
    let filter = active_where_clause.trim();
    if active_only && !filter.is_empty() {
        format!("{}\n{}", base, filter)
    } else {
        base.to_string()
    }
}

/// Query for a single student. Binds the registration number as `$1`.
pub fn lookup_query(students_query: &str) -> String {
    format!(
        "SELECT * FROM ({}) AS source WHERE CAST(reg_no AS TEXT) = $1",
        base_query(students_query)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_query_strips_trailing_semicolons() {
        assert_eq!(base_query("  SELECT * FROM v ;; ; \n"), "SELECT * FROM v");
        assert_eq!(base_query("SELECT ';' FROM v"), "SELECT ';' FROM v");
    }

    #[test]
    fn list_query_appends_filter_only_when_active() {
        let q = "SELECT * FROM vw_students;";
        assert_eq!(list_query(q, "WHERE active = 1", false), "SELECT * FROM vw_students");
        assert_eq!(
            list_query(q, "WHERE active = 1", true),
            "SELECT * FROM vw_students\nWHERE active = 1"
        );
    }

    #[test]
    fn list_query_ignores_empty_filter() {
        assert_eq!(list_query("SELECT 1", "   ", true), "SELECT 1");
    }

    #[test]
    fn lookup_query_wraps_base_as_subquery() {
        assert_eq!(
            lookup_query("SELECT reg_no FROM vw_students;"),
            "SELECT * FROM (SELECT reg_no FROM vw_students) AS source WHERE CAST(reg_no AS TEXT) = $1"
        );
    }
}
