//! Line-oriented domain extraction.
//!
//! List sources come in many shapes: plain one-domain-per-line lists,
//! hosts-style `0.0.0.0 domain` lists, and hosts files with several names
//! per line. Each source names the whitespace-separated field holding the
//! first domain; everything from that field to the end of the line counts.

/// Extract the domain names on `line`, starting at 0-based field `field_index`.
///
/// Anything from the first `#` onward is a comment. Returns an empty vector
/// when the line has no field at `field_index`.
///
/// # Examples
/// ```
/// use dnshole::parser::extract_domains;
/// assert_eq!(extract_domains("0.0.0.0 ads.example # tracker", 1), vec!["ads.example"]);
/// assert_eq!(extract_domains("127.0.0.1 a.test b.test", 1), vec!["a.test", "b.test"]);
/// assert!(extract_domains("# just a comment", 0).is_empty());
/// ```
pub fn extract_domains(line: &str, field_index: usize) -> Vec<&str> {
    let content = match line.find('#') {
        Some(i) => &line[..i],
        None => line,
    };

    content.split_whitespace().skip(field_index).collect()
}
