use std::hint::black_box;

use brunch::Bench;
use once_cell::sync::OnceCell;
use xdn::{io, Dictionary, NormalParameter, WordMode, WordType};

const SAMPLES: u32 = 500;

const ONSETS: &[&str] = &["s", "z", "t", "d", "k", "f", "v", "l", "r", "m"];
const VOWELS: &[&str] = &["a", "e", "i", "o", "u", "â", "á", "ê", "ô"];
const CODAS: &[&str] = &["", "s", "t", "l", "n", "k"];

/// Builds a dictionary text with one word per three-syllable combination up to `count` words.
fn synthetic_text(count: usize) -> String {
    let mut text = String::new();
    for index in 0..count {
        let mut name = String::new();
        let mut rest = index;
        for _ in 0..3 {
            name.push_str(ONSETS[rest % ONSETS.len()]);
            rest /= ONSETS.len();
            name.push_str(VOWELS[rest % VOWELS.len()]);
            name.push_str(CODAS[(rest + index) % CODAS.len()]);
        }
        text.push_str(&format!(
            "* @{} {name}\n\n!JA\n+ <動>\n= <動> 語{index}, 言葉{index}\nM: 意味{index}。\n- <類> {{sakil}}\n\n",
            1000 + index % 300
        ));
    }
    text.push_str("**\n\n!VERSION\n- S\n\n!ALPHABET\n- sztdkgfvpbcqxjlrnmyhaâáàeêéèiîíìoôòuûù\n\n");
    text.push_str("!REVISION\n- @1139 {pacar} → {parec}\n\n!MARKER\n");
    text
}

fn dictionary() -> &'static Dictionary {
    static DICTIONARY: OnceCell<Dictionary> = OnceCell::new();
    DICTIONARY.get_or_init(|| io::parse_single(&synthetic_text(5_000), None).unwrap())
}

fn search(dictionary: &Dictionary, text: &str, mode: WordMode, type_: WordType) -> usize {
    let mut parameter = NormalParameter::new(text, mode, type_, "ja");
    dictionary.search(&mut parameter).words.len()
}

brunch::benches!(
    Bench::new("Name prefix (\"sa\")")
        .with_samples(SAMPLES)
        .run_seeded_with(dictionary, |dict| search(
            dict,
            black_box("sa"),
            WordMode::Name,
            WordType::Prefix
        )),
    Bench::new("Name exact with inflection suggestions (\"duvilises\")")
        .with_samples(SAMPLES)
        .run_seeded_with(dictionary, |dict| search(
            dict,
            black_box("duvilises"),
            WordMode::Name,
            WordType::Exact
        )),
    Bench::new("Equivalent part (\"語12\")")
        .with_samples(SAMPLES)
        .run_seeded_with(dictionary, |dict| search(
            dict,
            black_box("語12"),
            WordMode::Equivalent,
            WordType::Part
        )),
    Bench::new("Content part (\"意味4\")")
        .with_samples(SAMPLES)
        .run_seeded_with(dictionary, |dict| search(
            dict,
            black_box("意味4"),
            WordMode::Content,
            WordType::Part
        )),
    Bench::spacer(),
    Bench::new("Pair (\"sasasa\")")
        .with_samples(SAMPLES)
        .run_seeded_with(dictionary, |dict| search(
            dict,
            black_box("sasasa"),
            WordMode::Name,
            WordType::Pair
        )),
    Bench::new("Regular (\"^s.t\")")
        .with_samples(SAMPLES)
        .run_seeded_with(dictionary, |dict| search(
            dict,
            black_box("^s.t"),
            WordMode::Name,
            WordType::Regular
        )),
);
