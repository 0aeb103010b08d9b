//! Tests for the CSV parser

#[cfg(test)]
mod parser_tests {
    use crate::dataset::Row;
    use crate::parser::{parse_csv, RowLimit, PAGE_ROW_CAP};

    fn numbered_csv(rows: usize) -> String {
        let mut text = String::from("id,value\n");
        for i in 0..rows {
            text.push_str(&format!("{},{}\n", i, i * 10));
        }
        text
    }

    #[test]
    fn test_single_row_round_trip() {
        let data = parse_csv("a,b,c\n1,2,3", RowLimit::Unbounded);
        assert_eq!(data.columns(), &["a", "b", "c"]);
        assert_eq!(data.len(), 1);
        assert_eq!(
            data.rows()[0],
            Row::from_pairs(&[("a", "1"), ("b", "2"), ("c", "3")])
        );
    }

    #[test]
    fn test_capped_variant_keeps_first_hundred_rows() {
        let data = parse_csv(&numbered_csv(150), RowLimit::Capped(PAGE_ROW_CAP));
        assert_eq!(data.len(), 100);
        for (i, row) in data.iter().enumerate() {
            assert_eq!(row.get("id"), Some(i.to_string().as_str()));
        }
    }

    #[test]
    fn test_unbounded_variant_keeps_every_row() {
        let data = parse_csv(&numbered_csv(150), RowLimit::Unbounded);
        assert_eq!(data.len(), 150);
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        let data = parse_csv("a,b\n1,2\n\n   \n3,4\n", RowLimit::Unbounded);
        assert_eq!(data.len(), 2);
        assert_eq!(data.rows()[1].get("a"), Some("3"));
    }

    #[test]
    fn test_blank_lines_do_not_count_against_cap() {
        let data = parse_csv("a\n1\n\n2\n3\n", RowLimit::Capped(2));
        assert_eq!(data.len(), 2);
        assert_eq!(data.rows()[1].get("a"), Some("2"));
    }

    #[test]
    fn test_headers_and_values_are_trimmed() {
        let data = parse_csv(" a , b \r\n 1 , 2 \r\n", RowLimit::Unbounded);
        assert_eq!(data.columns(), &["a", "b"]);
        assert_eq!(data.rows()[0].get("b"), Some("2"));
    }

    #[test]
    fn test_surplus_values_are_dropped() {
        let data = parse_csv("a,b\n1,2,3,4", RowLimit::Unbounded);
        assert_eq!(data.rows()[0].len(), 2);
    }

    #[test]
    fn test_missing_values_are_absent() {
        let data = parse_csv("a,b,c\n1", RowLimit::Unbounded);
        let row = &data.rows()[0];
        assert_eq!(row.get("a"), Some("1"));
        assert_eq!(row.get("b"), None);
        assert_eq!(row.get("c"), None);
    }

    #[test]
    fn test_empty_value_is_present() {
        let data = parse_csv("a,b\n,2", RowLimit::Unbounded);
        assert_eq!(data.rows()[0].get("a"), Some(""));
    }

    #[test]
    fn test_quoted_commas_are_not_special() {
        let data = parse_csv("name,price\n\"bed, bath\",10", RowLimit::Unbounded);
        let row = &data.rows()[0];
        assert_eq!(row.get("name"), Some("\"bed"));
        assert_eq!(row.get("price"), Some("bath\""));
    }

    #[test]
    fn test_empty_input_is_empty_dataset() {
        let data = parse_csv("", RowLimit::Unbounded);
        assert!(data.is_empty());
        assert!(data.columns().is_empty());
    }

    #[test]
    fn test_header_only_input_is_empty_dataset() {
        let data = parse_csv("a,b,c\n", RowLimit::Capped(PAGE_ROW_CAP));
        assert!(data.is_empty());
        assert_eq!(data.columns().len(), 3);
    }
}
