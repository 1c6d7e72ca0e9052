use unicode_width::UnicodeWidthStr;

/// Node size estimation for anchor selection before the renderer has
/// measured real boxes.
pub struct TextMetrics {
    pub char_width: f64,
    pub line_height: f64,
    pub padding_x: f64,
    pub padding_y: f64,
    pub header_padding: f64,
    pub min_node_width: f64,
    pub min_node_height: f64,
}

impl Default for TextMetrics {
    fn default() -> Self {
        Self {
            char_width: 8.0,
            line_height: 20.0,
            padding_x: 12.0,
            padding_y: 8.0,
            header_padding: 4.0,
            min_node_width: 250.0,
            min_node_height: 60.0,
        }
    }
}

impl TextMetrics {
    pub fn text_width(&self, text: &str) -> f64 {
        let width = UnicodeWidthStr::width(text);
        width as f64 * self.char_width
    }

    /// Estimated box for a table node: header row plus one row per column.
    pub fn node_size(&self, label: &str, columns: &[(String, String)]) -> (f64, f64) {
        let header_width = self.text_width(label);

        let max_col_width = columns
            .iter()
            .map(|(name, typ)| self.text_width(name) + self.text_width(typ) + self.char_width * 2.0)
            .fold(0.0, f64::max);

        let content_width = header_width.max(max_col_width) + self.padding_x * 2.0;
        let width = content_width.max(self.min_node_width);

        let header_height = self.line_height + self.header_padding * 2.0;
        let body_height = if columns.is_empty() {
            0.0
        } else {
            columns.len() as f64 * self.line_height + self.padding_y * 2.0
        };

        let height = (header_height + body_height).max(self.min_node_height);

        (width, height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_width() {
        let m = TextMetrics::default();
        assert_eq!(m.text_width("users"), 5.0 * 8.0);
    }

    #[test]
    fn test_cjk_width() {
        let m = TextMetrics::default();
        // Full-width characters count double
        assert_eq!(m.text_width("회원"), 4.0 * 8.0);
    }

    #[test]
    fn test_node_size_floors() {
        let m = TextMetrics::default();
        let (w, h) = m.node_size("t", &[]);
        assert_eq!(w, m.min_node_width);
        assert_eq!(h, m.min_node_height);
    }

    #[test]
    fn test_node_size_grows_with_columns() {
        let m = TextMetrics::default();
        let columns = vec![
            ("id".to_string(), "INT".to_string()),
            ("name".to_string(), "VARCHAR(50)".to_string()),
            ("created_at".to_string(), "TIMESTAMP".to_string()),
        ];
        let (_, h) = m.node_size("users", &columns);
        assert_eq!(h, 28.0 + 3.0 * 20.0 + 16.0);
    }

    #[test]
    fn test_wide_column_extends_width() {
        let m = TextMetrics::default();
        let columns = vec![(
            "a_rather_long_column_name".to_string(),
            "VARCHAR(255)".to_string(),
        )];
        let (w, _) = m.node_size("t", &columns);
        assert!(w > m.min_node_width);
    }
}
