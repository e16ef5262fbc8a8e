//! Classmap scanning
//!
//! Walks a directory (or reads a single file) and extracts the fully
//! qualified names of every class, interface, trait and enum declared in it.
//! The extractor is a small lexer: it only needs to get past comments,
//! strings and heredocs reliably to see declaration keywords.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, trace};
use walkdir::WalkDir;

use crate::error::{AutoloadError, Result};

/// File extensions picked up when scanning a directory
const SCAN_EXTENSIONS: &[&str] = &["php", "inc", "hh"];

/// Keywords that introduce a named type declaration
const TYPE_KEYWORDS: &[&str] = &["class", "interface", "trait", "enum"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token<'a> {
    /// Identifier or qualified name (may contain backslashes)
    Ident(&'a str),
    DoubleColon,
    Arrow,
    Symbol(u8),
}

fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_' || b >= 0x80
}

fn is_ident_char(b: u8) -> bool {
    is_ident_start(b) || b.is_ascii_digit()
}

fn find(bytes: &[u8], from: usize, needle: &[u8]) -> Option<usize> {
    bytes
        .get(from..)?
        .windows(needle.len())
        .position(|w| w == needle)
        .map(|pos| pos + from)
}

fn skip_line_comment(bytes: &[u8], mut i: usize) -> usize {
    while i < bytes.len() && bytes[i] != b'\n' {
        if bytes[i..].starts_with(b"?>") {
            break;
        }
        i += 1;
    }
    i
}

fn skip_quoted(bytes: &[u8], start: usize, quote: u8) -> usize {
    let mut i = start + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b if b == quote => return i + 1,
            _ => i += 1,
        }
    }
    bytes.len()
}

/// Skip a heredoc or nowdoc starting at `<<<`, returns `None` if it is not one
fn skip_heredoc(bytes: &[u8], start: usize) -> Option<usize> {
    let mut i = start + 3;
    while i < bytes.len() && (bytes[i] == b' ' || bytes[i] == b'\t') {
        i += 1;
    }
    if i < bytes.len() && (bytes[i] == b'\'' || bytes[i] == b'"') {
        i += 1;
    }
    let label_start = i;
    while i < bytes.len() && is_ident_char(bytes[i]) {
        i += 1;
    }
    let label = &bytes[label_start..i];
    if label.is_empty() {
        return None;
    }

    let mut line_start = find(bytes, i, b"\n")? + 1;
    loop {
        let mut j = line_start;
        while j < bytes.len() && (bytes[j] == b' ' || bytes[j] == b'\t') {
            j += 1;
        }
        if bytes[j..].starts_with(label)
            && bytes
                .get(j + label.len())
                .is_none_or(|&b| !is_ident_char(b))
        {
            return Some(j + label.len());
        }
        match find(bytes, line_start, b"\n") {
            Some(next) => line_start = next + 1,
            None => return Some(bytes.len()),
        }
    }
}

fn tokenize(source: &str) -> Vec<Token<'_>> {
    let bytes = source.as_bytes();
    let mut tokens = Vec::new();
    let mut in_php = false;
    let mut i = 0;

    while i < bytes.len() {
        if !in_php {
            let Some(open) = find(bytes, i, b"<?") else {
                break;
            };
            i = open + 2;
            if bytes.get(i..i + 3).is_some_and(|s| s.eq_ignore_ascii_case(b"php")) {
                i += 3;
            } else if bytes.get(i) == Some(&b'=') {
                i += 1;
            }
            in_php = true;
            continue;
        }

        let b = bytes[i];
        let next = bytes.get(i + 1).copied();
        match b {
            b'?' if next == Some(b'>') => {
                tokens.push(Token::Symbol(b';'));
                in_php = false;
                i += 2;
            }
            b'#' if next == Some(b'[') => {
                tokens.push(Token::Symbol(b'#'));
                i += 1;
            }
            b'#' => i = skip_line_comment(bytes, i),
            b'/' if next == Some(b'/') => i = skip_line_comment(bytes, i),
            b'/' if next == Some(b'*') => {
                i = find(bytes, i + 2, b"*/").map_or(bytes.len(), |end| end + 2);
            }
            b'\'' | b'"' | b'`' => i = skip_quoted(bytes, i, b),
            b'<' if bytes[i..].starts_with(b"<<<") => match skip_heredoc(bytes, i) {
                Some(end) => i = end,
                None => {
                    tokens.push(Token::Symbol(b'<'));
                    i += 1;
                }
            },
            b':' if next == Some(b':') => {
                tokens.push(Token::DoubleColon);
                i += 2;
            }
            b'-' if next == Some(b'>') => {
                tokens.push(Token::Arrow);
                i += 2;
            }
            b if is_ident_start(b) || b == b'\\' => {
                let start = i;
                while i < bytes.len() && (is_ident_char(bytes[i]) || bytes[i] == b'\\') {
                    i += 1;
                }
                tokens.push(Token::Ident(&source[start..i]));
            }
            b if b.is_ascii_whitespace() => i += 1,
            b => {
                tokens.push(Token::Symbol(b));
                i += 1;
            }
        }
    }

    tokens
}

fn is_keyword(token: Option<&Token<'_>>, keyword: &str) -> bool {
    matches!(token, Some(Token::Ident(word)) if word.eq_ignore_ascii_case(keyword))
}

/// Whether the identifier at `i` is used as a name rather than a keyword
fn is_name_usage(tokens: &[Token<'_>], i: usize) -> bool {
    let Some(prev) = i.checked_sub(1).and_then(|p| tokens.get(p)) else {
        return false;
    };
    matches!(
        prev,
        Token::DoubleColon | Token::Arrow | Token::Symbol(b'$')
    ) || is_keyword(Some(prev), "function")
        || is_keyword(Some(prev), "const")
        || is_keyword(Some(prev), "new")
}

/// Whether the token after a declared name can follow a type declaration
fn opens_declaration(token: Option<&Token<'_>>) -> bool {
    matches!(token, Some(Token::Symbol(b'{' | b':')))
        || is_keyword(token, "extends")
        || is_keyword(token, "implements")
}

/// Extract fully qualified type names declared in PHP source
pub fn find_classes(source: &str) -> Vec<String> {
    let tokens = tokenize(source);
    let mut namespace = String::new();
    let mut classes = Vec::new();
    let mut i = 0;

    while i < tokens.len() {
        let Token::Ident(word) = tokens[i] else {
            i += 1;
            continue;
        };

        if word.eq_ignore_ascii_case("namespace") && !is_name_usage(&tokens, i) {
            match tokens.get(i + 1) {
                Some(Token::Ident(name)) => {
                    namespace = name.trim_matches('\\').to_string();
                    i += 2;
                }
                Some(Token::Symbol(b'{')) => {
                    namespace.clear();
                    i += 1;
                }
                _ => i += 1,
            }
            continue;
        }

        let is_type_keyword = TYPE_KEYWORDS.iter().any(|k| word.eq_ignore_ascii_case(k));
        if is_type_keyword && !is_name_usage(&tokens, i) {
            if let Some(Token::Ident(name)) = tokens.get(i + 1) {
                if !name.contains('\\') && opens_declaration(tokens.get(i + 2)) {
                    classes.push(if namespace.is_empty() {
                        (*name).to_string()
                    } else {
                        format!("{namespace}\\{name}")
                    });
                    i += 2;
                    continue;
                }
            }
        }

        i += 1;
    }

    classes
}

fn has_scan_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| SCAN_EXTENSIONS.iter().any(|e| ext.eq_ignore_ascii_case(e)))
}

fn read_source(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|e| AutoloadError::FileReadFailed {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Insert a class, failing if another file already declares it
pub fn insert_class(
    map: &mut BTreeMap<String, PathBuf>,
    class: String,
    path: &Path,
) -> Result<()> {
    if let Some(existing) = map.get(&class) {
        if existing != path {
            return Err(AutoloadError::DuplicateClass {
                class,
                first: existing.display().to_string(),
                second: path.display().to_string(),
            });
        }
        return Ok(());
    }
    map.insert(class, path.to_path_buf());
    Ok(())
}

fn files_under(root: &Path) -> Result<Vec<PathBuf>> {
    if root.is_file() {
        return Ok(vec![root.to_path_buf()]);
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(root).follow_links(true).sort_by_file_name() {
        let entry = entry.map_err(|e| AutoloadError::FileReadFailed {
            path: e
                .path()
                .unwrap_or(root)
                .display()
                .to_string(),
            reason: e.to_string(),
        })?;
        if entry.file_type().is_file() && has_scan_extension(entry.path()) {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

/// Map every class declared under `root` to the file declaring it
///
/// A directory is scanned recursively for PHP sources; a file is parsed on
/// its own whatever its extension. A root that does not exist yields an
/// empty map.
pub fn create_map(root: &Path) -> Result<BTreeMap<String, PathBuf>> {
    let mut map = BTreeMap::new();
    if !root.exists() {
        debug!("Skipping missing classmap path {}", root.display());
        return Ok(map);
    }

    for file in files_under(root)? {
        let source = read_source(&file)?;
        for class in find_classes(&source) {
            trace!("Found {class} in {}", file.display());
            insert_class(&mut map, class, &file)?;
        }
    }

    Ok(map)
}
