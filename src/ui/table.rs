use crate::Summary;
use tabled::{settings::Style, Table, Tabled};

#[derive(Tabled)]
pub struct TableRow {
    #[tabled(rename = "Metric")]
    pub metric: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

#[derive(Default)]
pub struct TableBuilder {
    rows: Vec<TableRow>,
}

impl TableBuilder {
    pub fn new() -> Self {
        Self { rows: Vec::new() }
    }

    pub fn add_row(&mut self, label: &str, value: &str) {
        self.rows.push(TableRow {
            metric: label.to_string(),
            value: value.to_string(),
        });
    }

    pub fn build(&self) -> String {
        if self.rows.is_empty() {
            return String::new();
        }

        Table::new(&self.rows).with(Style::rounded()).to_string()
    }
}

pub fn summary_table(summary: &Summary) -> String {
    let mut builder = TableBuilder::new();
    builder.add_row("Files", &summary.files.to_string());
    builder.add_row("Read failures", &summary.failed.len().to_string());
    builder.add_row("Content bytes", &summary.bytes.to_string());
    builder.add_row("Output", &summary.output.display().to_string());
    builder.build()
}
