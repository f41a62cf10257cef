//! Markdown renderer: an executive summary table plus ranked tables of
//! offenders, suitable for pasting into a PR description or CI job summary.
//!
//! Tabular sections are built with `comfy_table::Table` under the
//! `ASCII_MARKDOWN` preset, which renders GitHub-flavored pipe tables
//! directly — the same approach the pack's `ra` CLI takes for its own
//! terminal tables, just with a Markdown-compatible preset instead of a
//! box-drawing one.

use super::OutputWriter;
use crate::core::{GodClassEntry, GodFileEntry, GodMethodRecord, Report, TreeNode};
use comfy_table::{presets::ASCII_MARKDOWN, Table};
use std::io::Write;

pub struct MarkdownWriter<W: Write> {
    writer: W,
}

impl<W: Write> MarkdownWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for MarkdownWriter<W> {
    fn write_report(&mut self, tree: &TreeNode, report: &Report) -> anyhow::Result<()> {
        self.write_header(tree)?;
        self.write_summary(report)?;
        self.write_god_files(report)?;
        self.write_god_classes(report)?;
        self.write_god_methods(report)?;
        Ok(())
    }
}

fn markdown_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table.load_preset(ASCII_MARKDOWN);
    table.set_header(header);
    table
}

impl<W: Write> MarkdownWriter<W> {
    fn write_header(&mut self, tree: &TreeNode) -> anyhow::Result<()> {
        writeln!(self.writer, "# Godhunter Report")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "Root: `{}`", tree.path.display())?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_summary(&mut self, report: &Report) -> anyhow::Result<()> {
        writeln!(self.writer, "## Summary")?;
        writeln!(self.writer)?;

        let mut table = markdown_table(vec!["Metric", "Value"]);
        table.add_row(vec!["Files analyzed".to_string(), report.total_files.to_string()]);
        table.add_row(vec!["Classes analyzed".to_string(), report.total_classes.to_string()]);
        table.add_row(vec![
            "Healthy classes".to_string(),
            report.healthy_class_count.to_string(),
        ]);
        table.add_row(vec!["God files".to_string(), report.god_files.len().to_string()]);
        table.add_row(vec!["God classes".to_string(), report.god_classes.len().to_string()]);
        table.add_row(vec!["God methods".to_string(), report.god_methods.len().to_string()]);
        table.add_row(vec![
            "Status".to_string(),
            if report.is_clean() { "PASS".to_string() } else { "FAIL".to_string() },
        ]);

        writeln!(self.writer, "{table}")?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_god_files(&mut self, report: &Report) -> anyhow::Result<()> {
        if report.god_files.is_empty() {
            return Ok(());
        }
        writeln!(self.writer, "## God Files")?;
        writeln!(self.writer)?;

        let mut table = markdown_table(vec!["File", "Classes", "Lines", "Score", "Violations"]);
        for GodFileEntry { file_path, verdict } in &report.god_files {
            table.add_row(vec![
                file_path.display().to_string(),
                verdict.class_count.to_string(),
                verdict.total_lines.to_string(),
                verdict.violation_score.to_string(),
                verdict.violations.join("; "),
            ]);
        }
        writeln!(self.writer, "{table}")?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_god_classes(&mut self, report: &Report) -> anyhow::Result<()> {
        if report.god_classes.is_empty() {
            return Ok(());
        }
        writeln!(self.writer, "## God Classes")?;
        writeln!(self.writer)?;

        let mut table = markdown_table(vec![
            "Class",
            "File",
            "Methods",
            "Lines",
            "Complexity",
            "Suggested Extractions",
        ]);
        for GodClassEntry {
            file_path,
            class_name,
            outcome,
        } in &report.god_classes
        {
            let extractions = outcome
                .suggested_extractions
                .iter()
                .map(|c| format!("{} ({:.2})", c.suggested_class_name, c.cohesion_score))
                .collect::<Vec<_>>()
                .join(", ");
            table.add_row(vec![
                class_name.clone(),
                file_path.display().to_string(),
                outcome.class.method_count.to_string(),
                outcome.class.line_count.to_string(),
                outcome.class.cyclomatic_complexity.to_string(),
                if extractions.is_empty() { "-".to_string() } else { extractions },
            ]);
        }
        writeln!(self.writer, "{table}")?;
        writeln!(self.writer)?;

        for entry in &report.god_classes {
            if entry.outcome.suggested_extractions.is_empty() {
                continue;
            }
            writeln!(self.writer, "### {} extractions", entry.class_name)?;
            writeln!(self.writer)?;
            for cluster in &entry.outcome.suggested_extractions {
                writeln!(
                    self.writer,
                    "- **{}** (cohesion {:.2}): {}",
                    cluster.suggested_class_name, cluster.cohesion_score, cluster.justification
                )?;
            }
            writeln!(self.writer)?;
        }
        Ok(())
    }

    fn write_god_methods(&mut self, report: &Report) -> anyhow::Result<()> {
        if report.god_methods.is_empty() {
            return Ok(());
        }
        writeln!(self.writer, "## God Methods")?;
        writeln!(self.writer)?;

        let mut table =
            markdown_table(vec!["Method", "Class", "File", "Lines", "Complexity", "Params", "Score"]);

        let mut ranked: Vec<&GodMethodRecord> = report.god_methods.iter().collect();
        ranked.sort_by(|a, b| b.violation_score.cmp(&a.violation_score));

        for record in ranked {
            table.add_row(vec![
                record.method.name.clone(),
                record.class_name.clone(),
                record.file_path.display().to_string(),
                record.method.line_count.to_string(),
                record.method.cyclomatic_complexity.to_string(),
                record.method.parameter_count().to_string(),
                record.violation_score.to_string(),
            ]);
        }
        writeln!(self.writer, "{table}")?;
        writeln!(self.writer)?;
        Ok(())
    }
}
