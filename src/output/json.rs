//! JSON renderer: the enriched tree and the flattened report, serialized
//! verbatim through each entity's own `Serialize` impl.

use super::OutputWriter;
use crate::core::{Report, TreeNode};
use serde::Serialize;
use std::io::Write;

#[derive(Serialize)]
struct JsonPayload<'a> {
    tree: &'a TreeNode,
    report: &'a Report,
}

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for JsonWriter<W> {
    fn write_report(&mut self, tree: &TreeNode, report: &Report) -> anyhow::Result<()> {
        let payload = JsonPayload { tree, report };
        let json = serde_json::to_string_pretty(&payload)?;
        self.writer.write_all(json.as_bytes())?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_valid_json_containing_both_sections() {
        let tree = TreeNode::directory("root", "/root", 0);
        let report = Report::default();
        let mut buf = Vec::new();
        {
            let mut writer = JsonWriter::new(&mut buf);
            writer.write_report(&tree, &report).unwrap();
        }
        let text = String::from_utf8(buf).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed["tree"]["name"], "root");
        assert_eq!(parsed["report"]["total_files"], 0);
    }
}
