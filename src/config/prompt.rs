use std::error::Error;
use std::fmt;
use std::fs;
use std::path::{ Path, PathBuf };

#[derive(Debug)]
pub enum PromptError {
    TemplateNotFound(PathBuf),
    EmptyTemplate(PathBuf),
    IoError(PathBuf, std::io::Error),
}

impl fmt::Display for PromptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PromptError::TemplateNotFound(path) =>
                write!(f, "Prompt template '{}' not found", path.display()),
            PromptError::EmptyTemplate(path) =>
                write!(f, "Prompt template '{}' is empty", path.display()),
            PromptError::IoError(path, e) =>
                write!(f, "Prompt template '{}' IO error: {}", path.display(), e),
        }
    }
}

impl Error for PromptError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            PromptError::IoError(_, e) => Some(e),
            _ => None,
        }
    }
}

/// Reads the system instruction template from disk.
///
/// The file is read on every call; nothing is cached.
pub fn load_system_prompt<P: AsRef<Path>>(path: P) -> Result<String, PromptError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            PromptError::TemplateNotFound(path.to_path_buf())
        } else {
            PromptError::IoError(path.to_path_buf(), e)
        }
    })?;
    if content.trim().is_empty() {
        return Err(PromptError::EmptyTemplate(path.to_path_buf()));
    }
    Ok(content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_template_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_system_prompt(dir.path().join("nope.txt")).unwrap_err();
        assert!(matches!(err, PromptError::TemplateNotFound(_)));
        assert!(err.to_string().contains("nope.txt"));
    }

    #[test]
    fn blank_template_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "   ").unwrap();
        let err = load_system_prompt(file.path()).unwrap_err();
        assert!(matches!(err, PromptError::EmptyTemplate(_)));
    }

    #[test]
    fn template_is_returned_verbatim() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "Answer in JSON.\n").unwrap();
        assert_eq!(load_system_prompt(file.path()).unwrap(), "Answer in JSON.\n");
    }
}
