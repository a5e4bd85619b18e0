use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::{env, fs, io};

/// Reads a training file and returns one source sequence per line.
///
/// - Reads the entire file into memory
/// - Splits on `\n` / `\r\n`
/// - Blank lines are kept; training skips them
pub fn read_file<P: AsRef<Path>>(filename: P) -> io::Result<Vec<String>> {
	let mut contents = String::new();
	File::open(filename)?.read_to_string(&mut contents)?;
	Ok(contents.lines().map(str::to_owned).collect())
}

/// Reads several training files and concatenates their lines in order.
pub fn read_files<P: AsRef<Path>>(filenames: &[P]) -> io::Result<Vec<String>> {
	let mut lines = Vec::new();
	for filename in filenames {
		lines.extend(read_file(filename)?);
	}
	Ok(lines)
}

/// Name of a training file, as listed and requested by clients: the
/// filename without folder and extension.
///
/// Examples:
/// - `"./data/names.txt"` → `Some("names")`
/// - `".."` → `None`
pub fn training_name<P: AsRef<Path>>(path: P) -> Option<String> {
	path.as_ref().file_stem().map(|stem| stem.to_string_lossy().into_owned())
}

/// Normalize a folder path.
///
/// - `"."` or `"./"` resolves to the current working directory
/// - Other paths are returned as-is (not canonicalized)
pub fn normalize_folder(input: &str) -> PathBuf {
	if input == "." || input == "./" {
		env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
	} else {
		PathBuf::from(input)
	}
}

/// Lists all files with a given extension in a directory.
///
/// Returns file names only (no paths), sorted.
pub fn list_files<P: AsRef<Path>>(dir: P, extension: &str) -> io::Result<Vec<String>> {
	let mut files = Vec::new();

	for entry in fs::read_dir(dir)? {
		let path = entry?.path();
		if path.is_file() && path.extension() == Some(std::ffi::OsStr::new(extension)) {
			if let Some(name) = path.file_name() {
				files.push(name.to_string_lossy().to_string());
			}
		}
	}

	files.sort();
	Ok(files)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn reads_lines_and_lists_training_files() {
		let dir = tempfile::tempdir().unwrap();
		fs::write(dir.path().join("cats.txt"), "Tom\r\nFelix\n\nGarfield\n").unwrap();
		fs::write(dir.path().join("dogs.txt"), "Rex\n").unwrap();
		fs::write(dir.path().join("notes.md"), "ignored").unwrap();

		assert_eq!(list_files(dir.path(), "txt").unwrap(), vec!["cats.txt", "dogs.txt"]);
		assert_eq!(
			read_file(dir.path().join("cats.txt")).unwrap(),
			vec!["Tom", "Felix", "", "Garfield"]
		);
		let both = [dir.path().join("dogs.txt"), dir.path().join("cats.txt")];
		assert_eq!(read_files(&both[..]).unwrap()[0], "Rex");
		assert_eq!(read_files(&both[..]).unwrap().len(), 5);
	}

	#[test]
	fn training_name_drops_folder_and_extension() {
		assert_eq!(training_name("./data/names.txt").as_deref(), Some("names"));
		assert_eq!(training_name("cities.txt").as_deref(), Some("cities"));
		assert_eq!(training_name(".."), None);
	}

	#[test]
	fn missing_file_is_an_error() {
		assert!(read_file("./definitely/not/here.txt").is_err());
	}
}
