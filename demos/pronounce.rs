use xdn::{create_pronouncer, PronouncerOptions};

fn main() {
    let mut options = PronouncerOptions::default();
    let mut version = None;
    let mut names = Vec::new();
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--syllables" => options.show_syllables = true,
            "--heavy" => options.light = false,
            _ if version.is_none() => version = Some(arg),
            _ => names.push(arg),
        }
    }
    let Some(version) = version else {
        eprintln!("Usage: pronounce [--syllables] [--heavy] VERSION NAME...");
        std::process::exit(1);
    };
    let Some(pronouncer) = create_pronouncer(&version, options) else {
        eprintln!("No pronouncer for version {version:?}");
        std::process::exit(1);
    };
    for name in names {
        println!("{name}\t/{}/", pronouncer.convert(&name));
    }
}
