//! Inflections of the stable grammar (versions `S` and `6`).

use super::{
    facet_name, strip_affixes, suggest_candidates, Candidate, Facet, Names, Suggester, Suggestion,
    SuggestionDescription, SuggestionKind,
};
use crate::{normalize, Dictionary, IgnoreOptions, Word};

/// The sort of word an inflection applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InflectionKind {
    Verbal,
    Nominal,
    Adverbial,
    Particle,
}

impl InflectionKind {
    pub fn names(self) -> Names {
        let (ja, en) = match self {
            Self::Verbal => ("動辞の語形変化", "Inflection of verbal"),
            Self::Nominal => ("名辞の語形変化", "Inflection of nominal"),
            Self::Adverbial => ("副辞の語形変化", "Inflection of adverbial"),
            Self::Particle => ("助接辞の語形変化", "Inflection of particle"),
        };
        Names { ja, en }
    }

    /// The Japanese abbreviation of the sort.
    fn sort(self) -> &'static str {
        match self {
            Self::Verbal => SORTS[0].affix,
            Self::Nominal => SORTS[1].affix,
            Self::Adverbial => SORTS[2].affix,
            Self::Particle => SORTS[4].affix,
        }
    }
}

/// Sorts of the stable grammar, with their Japanese abbreviations as the affix.
const SORTS: [Facet; 7] = [
    Facet::new("verbal", "動辞", "Verbal", "動"),
    Facet::new("nominal", "名辞", "Nominal", "名"),
    Facet::new("adverbial", "副辞", "Adverbial", "副"),
    Facet::new("functional", "機能辞", "Functional", "機"),
    Facet::new("particle", "助接辞", "Particle", "助"),
    Facet::new("connective", "連結辞", "Connective", "連"),
    Facet::new("interjection", "間投辞", "Interjection", "間"),
];

const CATEGORIES: [Facet; 8] = [
    Facet::new("verb", "動詞", "Verb", ""),
    Facet::new("noun", "名詞", "Noun", ""),
    Facet::new("adjective", "形容詞", "Adjective", ""),
    Facet::new("adverb", "副詞", "Adverb", ""),
    Facet::new("nounAdverb", "名詞修飾副詞", "Noun-modifying adverb", ""),
    Facet::new("preposition", "助詞", "Preposition", ""),
    Facet::new("conjunction", "接続詞", "Conjunction", ""),
    Facet::new("interjection", "間投詞", "Interjection", ""),
];

const TENSES: [Facet; 4] = [
    Facet::new("present", "現在時制", "Present", "a"),
    Facet::new("past", "過去時制", "Past", "e"),
    Facet::new("future", "未来時制", "Future", "i"),
    Facet::new("diachronic", "通時時制", "Diachronic", "o"),
];

/// Aspects, with their suffixes for the intransitive and the transitive.
const ASPECTS: [(Facet, [&str; 2]); 6] = [
    (Facet::new("inceptive", "開始相", "Inceptive", ""), ["f", "v"]),
    (Facet::new("progressive", "経過相", "Progressive", ""), ["c", "q"]),
    (Facet::new("perfect", "完了相", "Perfect", ""), ["k", "g"]),
    (Facet::new("continuous", "継続相", "Continuous", ""), ["t", "d"]),
    (Facet::new("terminative", "終了相", "Terminative", ""), ["p", "b"]),
    (Facet::new("indefinite", "無相", "Indefinite", ""), ["s", "z"]),
];

const TRANSITIVITIES: [Facet; 2] = [
    Facet::new("intransitive", "自動", "Intransitive", ""),
    Facet::new("transitive", "他動", "Transitive", ""),
];

const POLARITIES: [Facet; 2] = [
    Facet::new("positive", "肯定", "Positive", ""),
    Facet::new("negative", "否定", "Negative", "du"),
];

const NEGATIVE: Facet = POLARITIES[1];

const VERBAL_CATEGORIES: [Facet; 3] = [
    Facet::new("adjective", "", "", "a"),
    Facet::new("adverb", "", "", "o"),
    Facet::new("nounAdverb", "", "", "io"),
];

const NOMINAL_ADJECTIVE: Facet = Facet::new("adjective", "", "", "a");

const ADVERBIAL_ADVERB: Facet = Facet::new("adverb", "", "", "e");

const PARTICLE_FORMS: [Facet; 1] = [Facet::new("nonverb", "非動詞修飾", "Nonverb-modifying", "i")];

pub(crate) fn description_name(description: SuggestionDescription, language: &str) -> Option<&'static str> {
    let type_ = description.type_;
    match description.kind {
        "category" => facet_name(&CATEGORIES, type_, language),
        "tense" => facet_name(&TENSES, type_, language),
        "aspect" => facet_name(ASPECTS.iter().map(|(facet, _)| facet), type_, language),
        "transitivity" => facet_name(&TRANSITIVITIES, type_, language),
        "polarity" => facet_name(&POLARITIES, type_, language),
        "form" => facet_name(&PARTICLE_FORMS, type_, language),
        _ => None,
    }
}

pub struct InflectionSuggester {
    text: String,
    ignore_options: IgnoreOptions,
    candidates: Vec<Candidate<InflectionKind>>,
}

impl InflectionSuggester {
    pub fn new(text: &str, ignore_options: IgnoreOptions) -> Self {
        Self {
            text: normalize(text, ignore_options),
            ignore_options,
            candidates: Vec::new(),
        }
    }

    fn push(
        &mut self,
        kind: InflectionKind,
        prefix: &str,
        suffix: &str,
        descriptions: Vec<SuggestionDescription>,
    ) {
        if let Some(name) = strip_affixes(&self.text, prefix, suffix) {
            self.candidates.push(Candidate {
                kind,
                sort: kind.sort(),
                descriptions,
                name,
            });
        }
    }

    fn prepare_verbal_verb(&mut self) {
        for tense in &TENSES {
            for (aspect, suffixes) in &ASPECTS {
                for (transitivity, aspect_suffix) in TRANSITIVITIES.iter().zip(suffixes) {
                    for polarity in &POLARITIES {
                        let suffix = format!("{}{}", tense.affix, aspect_suffix);
                        let descriptions = vec![
                            SuggestionDescription::new("category", "verb"),
                            SuggestionDescription::new("tense", tense.type_),
                            SuggestionDescription::new("aspect", aspect.type_),
                            SuggestionDescription::new("transitivity", transitivity.type_),
                            SuggestionDescription::new("polarity", polarity.type_),
                        ];
                        self.push(InflectionKind::Verbal, polarity.affix, &suffix, descriptions);
                    }
                }
            }
        }
    }

    fn prepare_verbal_noun(&mut self) {
        let descriptions = vec![
            SuggestionDescription::new("category", "noun"),
            SuggestionDescription::new("polarity", NEGATIVE.type_),
        ];
        self.push(InflectionKind::Verbal, NEGATIVE.affix, "", descriptions);
    }

    fn prepare_verbal_others(&mut self) {
        for category in &VERBAL_CATEGORIES {
            for polarity in &POLARITIES {
                let prefix = format!("{}{}", category.affix, polarity.affix);
                let descriptions = vec![
                    SuggestionDescription::new("category", category.type_),
                    SuggestionDescription::new("polarity", polarity.type_),
                ];
                self.push(InflectionKind::Verbal, &prefix, "", descriptions);
            }
        }
    }

    fn prepare_nominal_adjective(&mut self) {
        for polarity in &POLARITIES {
            let prefix = format!("{}{}", NOMINAL_ADJECTIVE.affix, polarity.affix);
            let descriptions = vec![
                SuggestionDescription::new("category", NOMINAL_ADJECTIVE.type_),
                SuggestionDescription::new("polarity", polarity.type_),
            ];
            self.push(InflectionKind::Nominal, &prefix, "", descriptions);
        }
    }

    fn prepare_nominal_noun(&mut self) {
        let descriptions = vec![
            SuggestionDescription::new("category", "noun"),
            SuggestionDescription::new("polarity", NEGATIVE.type_),
        ];
        self.push(InflectionKind::Nominal, NEGATIVE.affix, "", descriptions);
    }

    fn prepare_adverbial(&mut self) {
        for polarity in &POLARITIES {
            let prefix = format!("{}{}", ADVERBIAL_ADVERB.affix, polarity.affix);
            let descriptions = vec![
                SuggestionDescription::new("category", ADVERBIAL_ADVERB.type_),
                SuggestionDescription::new("polarity", polarity.type_),
            ];
            self.push(InflectionKind::Adverbial, &prefix, "", descriptions);
        }
    }

    fn prepare_particle(&mut self) {
        for form in &PARTICLE_FORMS {
            let descriptions = vec![SuggestionDescription::new("form", form.type_)];
            self.push(InflectionKind::Particle, form.affix, "", descriptions);
        }
    }
}

impl Suggester for InflectionSuggester {
    fn prepare(&mut self) {
        self.candidates.clear();
        self.prepare_verbal_verb();
        self.prepare_verbal_noun();
        self.prepare_verbal_others();
        self.prepare_nominal_adjective();
        self.prepare_nominal_noun();
        self.prepare_adverbial();
        self.prepare_particle();
    }

    fn presuggest(&self, _dictionary: &Dictionary) -> Vec<Suggestion> {
        Vec::new()
    }

    fn suggest(&self, word: &Word, _dictionary: &Dictionary) -> Vec<Suggestion> {
        suggest_candidates(
            &self.candidates,
            word,
            self.ignore_options,
            SuggestionKind::StableInflection,
        )
    }
}
