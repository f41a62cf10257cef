//! Colored terminal summary: a human skimming a CI log, not a machine
//! consuming structured data (that's what the JSON writer is for).

use super::OutputWriter;
use crate::core::{GodMethodRecord, Report, TreeNode};
use colored::*;
use std::io::Write;

pub struct TerminalWriter<W: Write> {
    writer: W,
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for TerminalWriter<W> {
    fn write_report(&mut self, tree: &TreeNode, report: &Report) -> anyhow::Result<()> {
        self.print_header(tree)?;
        self.print_summary(report)?;
        self.print_god_files(report)?;
        self.print_god_classes(report)?;
        self.print_god_methods(report)?;
        self.print_verdict(report)?;
        Ok(())
    }
}

impl<W: Write> TerminalWriter<W> {
    fn print_header(&mut self, tree: &TreeNode) -> anyhow::Result<()> {
        writeln!(self.writer, "{}", "Godhunter Report".bold().blue())?;
        writeln!(self.writer, "{}", "=================".blue())?;
        writeln!(self.writer, "Root: {}", tree.path.display())?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn print_summary(&mut self, report: &Report) -> anyhow::Result<()> {
        writeln!(self.writer, "Summary:")?;
        writeln!(self.writer, "  Files analyzed:   {}", report.total_files)?;
        writeln!(self.writer, "  Classes analyzed: {}", report.total_classes)?;
        writeln!(self.writer, "  Healthy classes:  {}", report.healthy_class_count.to_string().green())?;
        let god_file_count = report.god_files.len();
        let god_file_text = if god_file_count > 0 {
            god_file_count.to_string().red()
        } else {
            god_file_count.to_string().green()
        };
        writeln!(self.writer, "  God files:        {god_file_text}")?;
        let god_class_count = report.god_classes.len();
        let god_class_text = if god_class_count > 0 {
            god_class_count.to_string().red()
        } else {
            god_class_count.to_string().green()
        };
        writeln!(self.writer, "  God classes:      {god_class_text}")?;
        let god_method_count = report.god_methods.len();
        let god_method_text = if god_method_count > 0 {
            god_method_count.to_string().red()
        } else {
            god_method_count.to_string().green()
        };
        writeln!(self.writer, "  God methods:      {god_method_text}")?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn print_god_files(&mut self, report: &Report) -> anyhow::Result<()> {
        if report.god_files.is_empty() {
            return Ok(());
        }
        writeln!(self.writer, "{}", "God Files:".yellow().bold())?;
        for entry in &report.god_files {
            writeln!(
                self.writer,
                "  {} {} ({} classes, {} lines, score {})",
                "-".yellow(),
                entry.file_path.display(),
                entry.verdict.class_count,
                entry.verdict.total_lines,
                entry.verdict.violation_score.to_string().red()
            )?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn print_god_classes(&mut self, report: &Report) -> anyhow::Result<()> {
        if report.god_classes.is_empty() {
            return Ok(());
        }
        writeln!(self.writer, "{}", "God Classes:".yellow().bold())?;
        for entry in &report.god_classes {
            writeln!(
                self.writer,
                "  {} {} in {} ({} methods, {} lines)",
                "-".yellow(),
                entry.class_name.yellow(),
                entry.file_path.display(),
                entry.outcome.class.method_count,
                entry.outcome.class.line_count
            )?;
            for cluster in &entry.outcome.suggested_extractions {
                writeln!(
                    self.writer,
                    "      extract {} ({} methods, cohesion {:.2})",
                    cluster.suggested_class_name.cyan(),
                    cluster.methods.len(),
                    cluster.cohesion_score
                )?;
            }
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn print_god_methods(&mut self, report: &Report) -> anyhow::Result<()> {
        if report.god_methods.is_empty() {
            return Ok(());
        }
        writeln!(self.writer, "{}", "God Methods (top 10):".yellow().bold())?;

        let mut ranked: Vec<&GodMethodRecord> = report.god_methods.iter().collect();
        ranked.sort_by(|a, b| b.violation_score.cmp(&a.violation_score));

        for record in ranked.iter().take(10) {
            writeln!(
                self.writer,
                "  {} {}::{} - {} (score {})",
                "-".yellow(),
                record.class_name,
                record.method.name.yellow(),
                record.violations.join(", "),
                record.violation_score.to_string().red()
            )?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn print_verdict(&mut self, report: &Report) -> anyhow::Result<()> {
        if report.is_clean() {
            writeln!(self.writer, "{} {}", "\u{2713}".green(), "PASS".green().bold())?;
        } else {
            writeln!(self.writer, "{} {}", "\u{2717}".red(), "FAIL".red().bold())?;
        }
        Ok(())
    }
}
