//! 语句拼接缓冲：子句之间用单个空格连接，空片段直接丢弃。

#[derive(Debug, Default, Clone)]
pub(crate) struct StringBuilder {
    buf: String,
}

impl StringBuilder {
    pub(crate) fn new() -> Self {
        Self { buf: String::new() }
    }

    /// 写入 `s`；缓冲非空时先补一个空格，`s` 为空则忽略。
    pub(crate) fn write_leading(&mut self, s: &str) {
        if s.is_empty() {
            return;
        }
        if !self.buf.is_empty() {
            self.buf.push(' ');
        }
        self.buf.push_str(s);
    }

    /// 关键字 + 列表：列表全空时整个子句都不写。
    pub(crate) fn write_clause(&mut self, keyword: &str, items: &[String], sep: &str) {
        let joined = join_non_empty(items, sep);
        if joined.is_empty() {
            return;
        }
        self.write_leading(keyword);
        self.write_leading(&joined);
    }

    pub(crate) fn into_string(self) -> String {
        self.buf
    }
}

pub(crate) fn join_non_empty(items: &[String], sep: &str) -> String {
    let mut out = String::new();
    for s in items.iter().filter(|s| !s.is_empty()) {
        if !out.is_empty() {
            out.push_str(sep);
        }
        out.push_str(s);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::{StringBuilder, join_non_empty};

    #[test]
    fn leading_skips_empty_parts() {
        let mut buf = StringBuilder::new();
        buf.write_leading("SELECT");
        buf.write_leading("");
        buf.write_leading("*");
        assert_eq!(buf.into_string(), "SELECT *");
    }

    #[test]
    fn clause_needs_items() {
        let mut buf = StringBuilder::new();
        buf.write_clause("GROUP BY", &[String::new()], ",");
        buf.write_clause("GROUP BY", &["a".to_string(), "b".to_string()], ",");
        assert_eq!(buf.into_string(), "GROUP BY a,b");
    }

    #[test]
    fn join_drops_blanks() {
        let items = vec!["a".to_string(), String::new(), "c".to_string()];
        assert_eq!(join_non_empty(&items, ","), "a,c");
    }
}
