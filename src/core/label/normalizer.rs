/// Class index every annotation collapses to in the merged dataset.
pub const MERGED_CLASS_INDEX: u32 = 0;

/// Rewrite the class index of a single YOLO label line.
///
/// Format: class_id x_center y_center width height
///
/// The first whitespace-separated token is replaced by `class_index` whatever
/// it held before; the geometry tokens are kept verbatim and re-joined with
/// single spaces. Empty or whitespace-only lines come back unchanged.
pub fn normalize_line(line: &str, class_index: u32) -> String {
    let mut tokens = line.split_whitespace();
    if tokens.next().is_none() {
        return line.to_string();
    }

    let class_token = class_index.to_string();
    std::iter::once(class_token.as_str())
        .chain(tokens)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Rewrite a whole label file.
///
/// Every line goes through [`normalize_line`]; the result is joined with `\n`,
/// surrounding blank content is trimmed and exactly one trailing newline is
/// appended.
pub fn normalize_label_content(content: &str, class_index: u32) -> String {
    let joined = content
        .lines()
        .map(|line| normalize_line(line, class_index))
        .collect::<Vec<_>>()
        .join("\n");

    let mut output = joined.trim().to_string();
    output.push('\n');
    output
}
