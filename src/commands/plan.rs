use anyhow::Result;
use std::path::Path;

use crate::{question::compile_questions, schema::load_schema};

pub fn run(path: &Path) -> Result<()> {
    let schema = load_schema(path)?;
    let questions = compile_questions(&schema);
    if questions.is_empty() {
        eprintln!("(schema has nothing to prompt for)");
    }
    super::print_json(&questions)
}
