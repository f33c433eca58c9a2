//! Utility functions and helpers

/// Group the digits of an unsigned integer string with a separator
///
/// `format_number("1500000", ".")` gives `"1.500.000"`.
pub fn format_number<T: ToString>(n: T, separator: &str) -> String {
    let s = n.to_string();
    let (sign, digits) = match s.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", s.as_str()),
    };

    let mut result = String::new();
    let mut count = 0;
    for c in digits.chars().rev() {
        if count == 3 {
            result.push_str(&separator.chars().rev().collect::<String>());
            count = 0;
        }
        result.push(c);
        count += 1;
    }
    format!("{}{}", sign, result.chars().rev().collect::<String>())
}

/// Escape text for safe interpolation into HTML fragments
pub fn escape_html(content: &str) -> String {
    let mut out = String::with_capacity(content.len());
    for c in content.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(1500000, "."), "1.500.000");
        assert_eq!(format_number(999, "."), "999");
        assert_eq!(format_number(1000, ","), "1,000");
        assert_eq!(format_number(-25000, "."), "-25.000");
        assert_eq!(format_number(0, "."), "0");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("Q1 <Marketing>"), "Q1 &lt;Marketing&gt;");
        assert_eq!(escape_html("a & 'b' \"c\""), "a &amp; &#39;b&#39; &quot;c&quot;");
        assert_eq!(escape_html("Presupuesto 2024"), "Presupuesto 2024");
    }
}
