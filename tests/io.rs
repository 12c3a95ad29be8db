use std::{fs, path::Path};

use xdn::{
    io::{self, FileNameResolver},
    Contents, Dictionary, DictionarySettings, Error, Marker, Markers, ParseErrorKind, Word,
};

const SINGLE: &str = "* @1128 ter
!JA
+ <動>
= <動> (/a/ が /e/ を) 飲む
M: /e/ を噛まずに口から体の中へ入れる。
U: 「飲む」という意味で一般に用いられるのが {ter}。「体の内部に入れてしまう」という意味を強調したのが {dazkut}。
- <類> {dazkut}
- <類> {sôd}
* @1128 sôd
!JA
+ <動>
= <動> (/a/ が /e/ を) 食べる, 食す
M: /e/ を何度か噛んで口から体の中へ入れる。
- <類> {ter}
- <類> {tonis}
* @1150 sakil
!JA
+ <名>
= <名> リンゴ
=? りんご, 林檎
M: ?
!EN
+ <noun>
= <noun> apple
* @1035 xoq
!JA
+ <名>
= <名> 本, 書籍, 書物, 図書, 冊子
- <類> {soxal}, {faltad}, {càrat}
**
!VERSION
- S
!ALPHABET
- sztdkgfvpbcqxjlrnmyhaâáàeêéèiîíìoôòuûù
!REVISION
- @1139 {pacar} → {parec}
- @1202 {los} → {loc}
- @1205 {'s} → {'c}
!MARKER
- xoq: pentagon, circle, square
- sôd: up
- sakil: hexagon, diamond, heart, trapezoid, cross
";

const WORD_ONLY: &str = "* @1068 monaf
!JA
+ <名>
= <名> 猫
=? ネコ, ねこ
M: ?
";

const ALPHABET: &str = "sztdkgfvpbcqxjlrnmyhaâáàeêéèiîíìoôòuûù";

fn check(dictionary: &Dictionary) {
    let mut names: Vec<_> = dictionary.words().iter().map(Word::unique_name).collect();
    names.sort_unstable();
    assert_eq!(names, ["sakil", "sôd", "ter", "xoq"]);

    let settings = dictionary.settings();
    assert_eq!(settings.version, "S");
    assert_eq!(settings.alphabet_rule, ALPHABET);
    let revisions: Vec<_> = settings.revisions.iter().collect();
    assert_eq!(revisions.len(), 3);
    assert_eq!(revisions[0].date, Some(1139));
    assert_eq!(revisions[0].before_name, "pacar");
    assert_eq!(revisions[0].after_name, "parec");
    assert_eq!(revisions[2].date, Some(1205));
    assert_eq!(revisions[2].before_name, "'s");
    assert_eq!(revisions[2].after_name, "'c");

    let markers = dictionary.markers();
    assert_eq!(markers.get("xoq"), [Marker::Circle, Marker::Square, Marker::Pentagon]);
    assert_eq!(markers.get("sôd"), [Marker::Up]);
    assert_eq!(
        markers.get("sakil"),
        [
            Marker::Diamond,
            Marker::Cross,
            Marker::Heart,
            Marker::Hexagon,
            Marker::Trapezoid
        ]
    );

    let sakil = dictionary.find_by_unique_name("sakil").unwrap();
    assert_eq!(sakil.date(), 1150);
    assert_eq!(sakil.contents().get("en"), Some("+ <noun>\n= <noun> apple"));
    assert!(sakil.comparison_string().is_some());
}

fn write(path: &Path, text: &str) {
    fs::write(path, text).unwrap();
}

#[test]
fn single_load() {
    let directory = tempfile::tempdir().unwrap();
    let path = directory.path().join("testdic.xdn");
    write(&path, SINGLE);
    let dictionary = io::load_single(&path).unwrap();
    check(&dictionary);
    assert_eq!(dictionary.path(), Some(path.as_path()));
}

#[test]
fn single_round_trip() {
    let directory = tempfile::tempdir().unwrap();
    let path = directory.path().join("testdic.xdn");
    write(&path, SINGLE);

    let load_and_save = || {
        let dictionary = io::load(&path).unwrap();
        io::save(&dictionary, &path).unwrap();
        fs::read_to_string(&path).unwrap()
    };
    let first = load_and_save();
    let second = load_and_save();
    assert_eq!(first, second);
    check(&io::load_single(&path).unwrap());
}

#[test]
fn single_without_others() {
    let dictionary = io::parse_single(WORD_ONLY, None).unwrap();
    assert_eq!(dictionary.len(), 1);
    assert_eq!(dictionary.settings(), &DictionarySettings::default());
    assert!(dictionary.markers().is_empty());

    let text = format!("{WORD_ONLY}**\n!MARKER\n- xoq: pentagon, circle, square\n");
    let dictionary = io::parse_single(&text, None).unwrap();
    assert_eq!(dictionary.settings(), &DictionarySettings::default());
    assert_eq!(dictionary.markers().len(), 1);

    let text = format!(
        "{WORD_ONLY}**\n!VERSION\n- S\n!ALPHABET\n- {ALPHABET}\n!REVISION\n- @1139 {{pacar}} → {{parec}}\n"
    );
    let dictionary = io::parse_single(&text, None).unwrap();
    assert_eq!(dictionary.settings().version, "S");
    assert!(dictionary.markers().is_empty());
}

#[test]
fn single_with_insufficient_settings() {
    let text = format!(
        "{WORD_ONLY}**\n!VERSION\n- S\n!REVISION\n- @1139 {{pacar}} → {{parec}}\n!MARKER\n- xoq: circle\n"
    );
    let err = io::parse_single(&text, None).unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::InsufficientDictionarySettings);

    let directory = tempfile::tempdir().unwrap();
    let path = directory.path().join("testdic.xdn");
    write(&path, &text);
    assert!(matches!(io::load_single(&path), Err(Error::Parse(_))));
}

#[test]
fn missing_file() {
    let directory = tempfile::tempdir().unwrap();
    let err = io::load_single(directory.path().join("missing.xdn")).unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}

#[test]
fn directory_round_trip() {
    let directory = tempfile::tempdir().unwrap();
    let single = directory.path().join("testdic.xdn");
    let path = directory.path().join("testdic");
    write(&single, SINGLE);
    io::save(&io::load(&single).unwrap(), &path).unwrap();
    assert!(path.join("#SETTINGS.xdns").is_file());
    assert!(path.join("#MARKERS.xdns").is_file());
    assert!(path.join("sôd.xdnw").is_file());

    let dictionary = io::load_directory(&path).unwrap();
    check(&dictionary);
    assert_eq!(dictionary.path(), Some(path.as_path()));

    let read_all = || {
        let mut files: Vec<_> = fs::read_dir(&path)
            .unwrap()
            .map(|entry| {
                let entry = entry.unwrap().path();
                let text = fs::read_to_string(&entry).unwrap();
                (entry, text)
            })
            .collect();
        files.sort();
        files
    };
    let first = read_all();
    io::save(&io::load(&path).unwrap(), &path).unwrap();
    assert_eq!(first, read_all());
}

#[test]
fn directory_save_replaces_stale_files() {
    let directory = tempfile::tempdir().unwrap();
    write(&directory.path().join("old.xdnw"), "* @1 old\n");
    write(&directory.path().join("notes.txt"), "kept");
    let words = vec![Word::new("+lic~", 1, Contents::from_iter([("ja", "= 新")]))];
    let dictionary = Dictionary::new(words, DictionarySettings::default(), Markers::new(), None);
    io::save_directory(&dictionary, directory.path(), &FileNameResolver::default()).unwrap();

    assert!(!directory.path().join("old.xdnw").exists());
    assert!(directory.path().join("notes.txt").exists());
    assert_eq!(
        fs::read_to_string(directory.path().join("lic_S2.xdnw")).unwrap(),
        "* @1 +lic~\n\n!JA\n= 新\n"
    );
}

#[test]
fn directory_without_others() {
    let directory = tempfile::tempdir().unwrap();
    write(&directory.path().join("monaf.xdnw"), WORD_ONLY);
    let dictionary = io::load_directory(directory.path()).unwrap();
    assert_eq!(dictionary.len(), 1);
    assert_eq!(dictionary.settings(), &DictionarySettings::default());
    assert!(dictionary.markers().is_empty());
}

#[test]
fn directory_with_insufficient_settings() {
    let directory = tempfile::tempdir().unwrap();
    write(&directory.path().join("monaf.xdnw"), WORD_ONLY);
    write(
        &directory.path().join("#SETTINGS.xdns"),
        "**\n!VERSION\n- S\n!REVISION\n",
    );
    let err = io::load_directory(directory.path()).unwrap_err();
    assert!(matches!(
        err,
        Error::Parse(ref err) if err.kind == ParseErrorKind::InsufficientDictionarySettings
    ));
}

#[test]
fn directory_skips_invalid_utf8() {
    let directory = tempfile::tempdir().unwrap();
    write(&directory.path().join("monaf.xdnw"), WORD_ONLY);
    fs::write(directory.path().join("broken.xdnw"), [0x2a, 0x20, 0xff, 0xfe]).unwrap();
    let dictionary = io::load_directory(directory.path()).unwrap();
    assert_eq!(dictionary.len(), 1);
}

#[test]
fn diff_save_touches_only_mutations() {
    let directory = tempfile::tempdir().unwrap();
    let single = directory.path().join("testdic.xdn");
    let path = directory.path().join("testdic");
    write(&single, SINGLE);
    io::save(&io::load(&single).unwrap(), &path).unwrap();

    let mut dictionary = io::load(&path).unwrap();
    let ter = dictionary.find_by_unique_name("ter").unwrap().uid().to_string();
    let xoq = dictionary.find_by_unique_name("xoq").unwrap().uid().to_string();
    dictionary
        .edit_word(&ter, "ter~", 1200, Contents::from_iter([("ja", "+ <動>\n= 飲む")]))
        .unwrap();
    dictionary.delete_word(&xoq).unwrap();
    dictionary
        .add_word(Word::new("lic", 1201, Contents::from_iter([("ja", "+ <名>")])))
        .unwrap();
    dictionary.toggle_marker("lic", Marker::Heart);
    // Untracked files are left alone.
    write(&path.join("sakil.xdnw"), "* @1 sakil\n");

    io::save_directory_diff(&mut dictionary, &path, &FileNameResolver::default()).unwrap();
    assert!(dictionary.mutations().is_empty());
    assert!(!path.join("ter.xdnw").exists());
    assert!(!path.join("xoq.xdnw").exists());
    assert_eq!(
        fs::read_to_string(path.join("ter_2.xdnw")).unwrap(),
        "* @1200 ter~\n\n!JA\n+ <動>\n= 飲む\n"
    );
    assert!(path.join("lic.xdnw").exists());
    assert_eq!(fs::read_to_string(path.join("sakil.xdnw")).unwrap(), "* @1 sakil\n");
    let markers = fs::read_to_string(path.join("#MARKERS.xdns")).unwrap();
    assert!(markers.ends_with("- lic: heart\n"));
}

#[test]
fn resolver_file_names() {
    let resolver = FileNameResolver::default();
    assert_eq!(resolver.word_base_name("+sakil"), "sakil_S");
    assert_eq!(resolver.word_base_name("sakil+"), "sakil_P");
    assert_eq!(resolver.word_base_name("+sakil+"), "sakil_SP");
    assert_eq!(resolver.word_base_name("sakil~~"), "sakil_3");
    assert_eq!(resolver.word_base_name("+sakil+~"), "sakil_SP2");
    assert_eq!(resolver.word_base_name("l\u{2019}a"), "l'a");
    assert_eq!(resolver.settings_base_name, "#SETTINGS");
    assert_eq!(resolver.markers_base_name, "#MARKERS");
}
