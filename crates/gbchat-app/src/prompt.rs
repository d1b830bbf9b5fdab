use colored::Colorize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use gbchat_encoding::EncodingError;

#[derive(Debug, Error)]
pub enum PromptError {
    #[error("{}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("{}: {source}", path.display())]
    Decode { path: PathBuf, source: EncodingError },
}

/// Read a GB2312 prompt file, normalize line endings to `\n` and trim
/// surrounding whitespace.
pub fn read_prompt_file(path: &Path) -> Result<String, PromptError> {
    let bytes = fs::read(path).map_err(|source| PromptError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let text = gbchat_encoding::decode(&bytes).map_err(|source| PromptError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(text.replace("\r\n", "\n").replace('\r', "\n").trim().to_string())
}

/// Like [`read_prompt_file`], but a failure is printed and yields an empty prompt.
pub fn load_prompt(path: &Path) -> String {
    match read_prompt_file(path) {
        Ok(prompt) => prompt,
        Err(e) => {
            println!("{}", format!("Failed to read prompt file: {}", e).red());
            String::new()
        }
    }
}
