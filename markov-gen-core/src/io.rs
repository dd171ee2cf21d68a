use std::ffi::OsStr;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::{env, fs, io};

use crate::error::{MarkovError, Result};

/// Extension of the source documents picked up when a directory is given.
pub const SOURCE_EXTENSION: &str = "txt";

/// Reads a whole source document as UTF-8 text.
pub fn read_text<P: AsRef<Path>>(filename: P) -> Result<String> {
	let path = filename.as_ref();
	let mut contents = String::new();
	File::open(path)
		.and_then(|mut file| file.read_to_string(&mut contents))
		.map_err(|e| MarkovError::io(path, e))?;
	Ok(contents)
}

/// Removes quotation marks and/or parentheses from raw text.
///
/// Applied before tokenizing, so `("Amen.")` becomes `Amen.`.
pub fn strip_chars(text: &str, quotes: bool, parens: bool) -> String {
	text.chars()
		.filter(|c| match c {
			'"' => !quotes,
			'(' | ')' => !parens,
			_ => true,
		})
		.collect()
}

/// Splits text on runs of whitespace.
///
/// Nothing else is normalized: case is kept and punctuation stays attached
/// to the preceding word, which is what sentence detection relies on.
pub fn tokenize(text: &str) -> Vec<String> {
	text.split_whitespace().map(str::to_owned).collect()
}

/// Extracts the base filename without extension, used as the source name.
///
/// Examples:
/// - `"./data/bible.txt"` → `"bible"`
/// - `"bible"` → `"bible"`
pub fn source_name<P: AsRef<Path>>(input_path: P) -> io::Result<String> {
	let stem = input_path
		.as_ref()
		.file_stem()
		.ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "Path has no filename"))?;

	Ok(stem.to_string_lossy().to_string())
}

/// Normalize a folder path.
///
/// - `"."` or `"./"` resolves to the current working directory
/// - Other paths are returned as-is (not canonicalized)
pub(crate) fn normalize_folder(input: &Path) -> PathBuf {
	if input == Path::new(".") || input == Path::new("./") {
		env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
	} else {
		input.to_path_buf()
	}
}

/// Lists all files with a given extension in a directory, sorted by name.
///
/// Returns full paths. Subdirectories are ignored.
pub fn list_files<P: AsRef<Path>>(dir: P, extension: &str) -> io::Result<Vec<PathBuf>> {
	let mut files = Vec::new();

	for entry in fs::read_dir(dir)? {
		let path = entry?.path();
		if path.is_file() && path.extension() == Some(OsStr::new(extension)) {
			files.push(path);
		}
	}

	files.sort();
	Ok(files)
}

/// Turns user-supplied paths into the explicit list of source documents.
///
/// Directories are replaced by the `.txt` files they directly contain;
/// files are kept in the order given.
///
/// # Errors
/// Returns an error if a directory cannot be listed.
pub fn expand_sources<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<PathBuf>> {
	let mut sources = Vec::new();
	for path in paths {
		let path = normalize_folder(path.as_ref());
		if path.is_dir() {
			let files = list_files(&path, SOURCE_EXTENSION).map_err(|e| MarkovError::io(&path, e))?;
			sources.extend(files);
		} else {
			sources.push(path);
		}
	}
	Ok(sources)
}
