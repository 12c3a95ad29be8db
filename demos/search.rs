use std::process::ExitCode;

use xdn::{io, NormalParameter, WordMode, WordType};

macro_rules! usage {
    () => {{
        eprintln!("Usage: search path/to/dictionary TEXT [MODE] [TYPE] [LANG]");
        eprintln!("  MODE is one of name, equivalent, both, content (default: both)");
        eprintln!("  TYPE is one of exact, prefix, suffix, part, pair, regular (default: prefix)");
        return ExitCode::FAILURE;
    }};
}

fn main() -> ExitCode {
    let mut args = std::env::args().skip(1);
    let Some(path) = args.next() else {
        usage!();
    };
    let Some(text) = args.next() else {
        usage!();
    };
    let mode = match args.next() {
        Some(name) => match WordMode::from_name(&name) {
            Some(mode) => mode,
            None => usage!(),
        },
        None => WordMode::Both,
    };
    let type_ = match args.next() {
        Some(name) => match WordType::from_name(&name) {
            Some(type_) => type_,
            None => usage!(),
        },
        None => WordType::Prefix,
    };
    let language = args.next().unwrap_or_else(|| "ja".to_string());

    let dictionary = match io::load(&path) {
        Ok(dictionary) => dictionary,
        Err(err) => {
            eprintln!("Failed to load {path}: {err}");
            return ExitCode::FAILURE;
        }
    };
    println!("Loaded {} words", dictionary.len());

    let mut parameter = NormalParameter::new(&text, mode, type_, &language);
    let result = dictionary.search(&mut parameter);
    for suggestion in &result.suggestions {
        let descriptions: Vec<_> = suggestion
            .description_names(&language)
            .into_iter()
            .flatten()
            .collect();
        println!(
            "? {} ({}) → {}",
            suggestion.kind_name(&language).unwrap_or("?"),
            descriptions.join(", "),
            suggestion.names().join(", ")
        );
    }
    for word in result.slice_words(0) {
        println!("* {}", word.unique_name());
    }
    println!(
        "{} hits, {} pages, in {:?}",
        result.words.len(),
        result.max_page() + 1,
        result.elapsed
    );
    ExitCode::SUCCESS
}
