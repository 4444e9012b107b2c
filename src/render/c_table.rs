//! C source rendering of the help corpus.
//!
//! One `static <entry_type>` array per help file, each a list of
//! `{ topic, NULL-terminated content array }` pairs, followed by a single
//! `<file_type>` table mapping file basenames to those arrays. Files are
//! emitted in path order and sections in the order they were parsed, so the
//! same corpus always renders to the same bytes.

use crate::config::CodegenConfig;
use crate::domain::{Corpus, HelpFile};

const BANNER: &str = "// THIS FILE IS GENERATED AUTOMATICALLY! EDITS WILL BE LOST!";

/// Escape a help line for use inside a C string literal.
///
/// Double quotes are backslash-escaped, embedded newlines split the literal,
/// and the `\;` pseudo-escape used in help files becomes a plain `;`.
pub fn escape_c_line(line: &str) -> String {
    line.replace('"', "\\\"").replace('\n', "\\n\"\n\"").replace("\\;", ";")
}

fn include_line(header: &str) -> String {
    if header.starts_with('<') {
        format!("#include {}\n", header)
    } else {
        format!("#include \"{}\"\n", header)
    }
}

fn render_entries(array_name: &str, entry_type: &str, file: &HelpFile) -> String {
    let mut entries: Vec<String> = file
        .sections()
        .iter()
        .map(|section| {
            let mut entry = format!(
                "    {{ .topic = \"{}\",\n      .content = (const char *[]){{\n",
                escape_c_line(&section.topic)
            );
            for line in &section.lines {
                entry.push_str(&format!("                 \"{}\",\n", escape_c_line(line)));
            }
            entry.push_str("                 NULL}\n    },\n");
            entry
        })
        .collect();
    entries.push("    { .topic = NULL, .content = NULL }".to_string());

    format!("static {} {}[] = {{\n{}\n}};\n", entry_type, array_name, entries.join("\n"))
}

/// Render `corpus` as a self-contained C source file.
///
/// `program` is named in the banner comment.
pub fn render_c_tables(corpus: &Corpus, codegen: &CodegenConfig, program: &str) -> String {
    let mut out = format!("{}\n// This file generated by {}\n\n", BANNER, program);
    for header in &codegen.includes {
        out.push_str(&include_line(header));
    }
    out.push('\n');

    let mut arrays = Vec::with_capacity(corpus.len());
    let mut file_entries = Vec::with_capacity(corpus.len() + 1);
    for (idx, (path, file)) in corpus.iter().enumerate() {
        let array_name = format!("ini_entries_{}", idx);
        arrays.push(render_entries(&array_name, &codegen.entry_type, file));
        file_entries.push(format!("    {{ \"{}\", {}}}", Corpus::file_key(path), array_name));
    }
    file_entries.push("    { NULL, NULL }".to_string());

    out.push_str(&arrays.join("\n"));
    out.push('\n');
    out.push_str(&format!(
        "{} {}[] = {{\n{}\n}};\n",
        codegen.file_type,
        codegen.table_name,
        file_entries.join(",\n")
    ));
    out
}
