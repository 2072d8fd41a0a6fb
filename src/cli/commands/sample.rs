use anyhow::Result;

use crate::output::serialize;
use crate::scenario::{sample_record, to_output};

pub struct SampleCommand {
    pub document: bool,
}

impl SampleCommand {
    pub fn new() -> Self {
        Self { document: false }
    }

    pub fn with_document(mut self, document: bool) -> Self {
        self.document = document;
        self
    }

    pub fn render(&self) -> Result<String> {
        let record = sample_record();
        let text = if self.document {
            serialize(&to_output(&record))?
        } else {
            serde_json::to_string_pretty(&record)?
        };
        Ok(text)
    }

    pub async fn execute(&self) -> Result<()> {
        println!("{}", self.render()?);
        Ok(())
    }
}

impl Default for SampleCommand {
    fn default() -> Self {
        Self::new()
    }
}
