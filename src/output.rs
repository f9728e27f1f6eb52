use std::fmt::Write;

/// Declarative output sink with separate body (`source`) and
/// header-declaration (`header`) streams, plus a raw staging stream for
/// compressible payloads. Pointer-bearing records never land in `binary`;
/// they only resolve at link time.
#[derive(Debug, Default)]
pub struct Output {
    pub binary: Vec<u8>,
    pub source: String,
    pub header: String,
}

impl Output {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset_binary(&mut self) {
        self.binary.clear();
    }

    pub fn decl(&mut self, kind: Option<&str>, name: &str, align: usize, global: bool) {
        writeln!(self.source, "    .align  {}", align).unwrap();

        if global {
            writeln!(self.source, "    .global {}", name).unwrap();

            if let Some(kind) = kind {
                writeln!(self.header, "extern const {} {};", kind, name).unwrap();
            }
        }

        writeln!(self.source, "{}:", name).unwrap();
    }

    pub fn dc_w(&mut self, value: u16) {
        writeln!(self.source, "    dc.w    {}", value).unwrap();
    }

    pub fn dc_l(&mut self, label: &str) {
        writeln!(self.source, "    dc.l    {}", label).unwrap();
    }

    pub fn dc_b(&mut self, bytes: &[u8]) {
        for row in bytes.chunks(16) {
            let row: Vec<_> = row.iter().map(|byte| format!("{:#04x}", byte)).collect();

            writeln!(self.source, "    dc.b    {}", row.join(", ")).unwrap();
        }
    }

    pub fn blank(&mut self) {
        self.source.push('\n');
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn global_decl_exports_a_header_extern() {
        let mut out = Output::new();

        out.decl(Some("Animation"), "hero_anim0", 2, true);

        assert_eq!(
            out.source,
            "    .align  2\n    .global hero_anim0\nhero_anim0:\n"
        );
        assert_eq!(out.header, "extern const Animation hero_anim0;\n");
    }

    #[test]
    fn internal_decl_stays_out_of_the_header() {
        let mut out = Output::new();

        out.decl(None, "hero_anim0_frames", 2, false);

        assert_eq!(out.source, "    .align  2\nhero_anim0_frames:\n");
        assert_eq!(out.header, "");
    }

    #[test]
    fn byte_rows_wrap_at_sixteen() {
        let mut out = Output::new();

        out.dc_b(&[0xAB; 17]);

        let lines: Vec<_> = out.source.lines().collect();

        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("    dc.b    0xab, "));
        assert_eq!(lines[1], "    dc.b    0xab");
    }
}
