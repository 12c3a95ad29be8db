//! Inflections of the shal grammar (versions `7.2` and later).
//!
//! Compared to the stable grammar, verbs inflect for voice rather than transitivity and
//! lose the terminative aspect, and adverbials split into adpredicatives and specials.

use super::{
    facet_name, strip_affixes, suggest_candidates, Candidate, Facet, Names, Suggester, Suggestion,
    SuggestionDescription, SuggestionKind,
};
use crate::{normalize, Dictionary, IgnoreOptions, Word};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InflectionKind {
    Verbal,
    Nominal,
    Adpredicative,
    Special,
    Particle,
}

impl InflectionKind {
    pub fn names(self) -> Names {
        let (ja, en) = match self {
            Self::Verbal => ("動辞の語形変化", "Inflection of verbal"),
            Self::Nominal => ("名辞の語形変化", "Inflection of nominal"),
            Self::Adpredicative => ("連述辞の語形変化", "Inflection of adpredicative"),
            Self::Special => ("特殊辞の語形変化", "Inflection of special"),
            Self::Particle => ("助接辞の語形変化", "Inflection of particle"),
        };
        Names { ja, en }
    }

    fn sort(self) -> &'static str {
        let index = match self {
            Self::Verbal => 0,
            Self::Nominal => 1,
            Self::Adpredicative => 2,
            Self::Special => 3,
            Self::Particle => 4,
        };
        SORTS[index].affix
    }
}

const SORTS: [Facet; 5] = [
    Facet::new("verbal", "動辞", "Verbal", "動"),
    Facet::new("nominal", "名辞", "Nominal", "名"),
    Facet::new("adpredicative", "連述辞", "Adpredicative", "述"),
    Facet::new("special", "特殊辞", "Special", "特"),
    Facet::new("particle", "助接辞", "Particle", "助"),
];

const CATEGORIES: [Facet; 8] = [
    Facet::new("verb", "動詞", "Verb", ""),
    Facet::new("noun", "名詞", "Noun", ""),
    Facet::new("adjective", "形容詞", "Adjective", ""),
    Facet::new("adverb", "副詞", "Adverb", ""),
    Facet::new("nonverbAdverb", "非動詞修飾副詞", "Nonverb-modifying adverb", ""),
    Facet::new("adpredicative", "連述詞", "Adpredicative", ""),
    Facet::new("nonverbAdpredicative", "非動詞修飾連述詞", "Nonverb-modifying adpredicative", ""),
    Facet::new("special", "特殊詞", "Special", ""),
];

const TENSES: [Facet; 4] = [
    Facet::new("present", "現在時制", "Present", "a"),
    Facet::new("past", "過去時制", "Past", "e"),
    Facet::new("future", "未来時制", "Future", "i"),
    Facet::new("diachronic", "通時時制", "Diachronic", "o"),
];

/// Aspects, with their suffixes for the normal and the auxiliary voice.
const ASPECTS: [(Facet, [&str; 2]); 5] = [
    (Facet::new("inceptive", "開始相", "Inceptive", ""), ["f", "v"]),
    (Facet::new("progressive", "経過相", "Progressive", ""), ["c", "q"]),
    (Facet::new("perfect", "完了相", "Perfect", ""), ["k", "g"]),
    (Facet::new("continuous", "継続相", "Continuous", ""), ["t", "d"]),
    (Facet::new("indefinite", "無相", "Indefinite", ""), ["s", "z"]),
];

const VOICES: [Facet; 2] = [
    Facet::new("normal", "通常態", "Normal", ""),
    Facet::new("auxiliary", "補助態", "Auxiliary", ""),
];

const POLARITIES: [Facet; 2] = [
    Facet::new("positive", "肯定", "Positive", ""),
    Facet::new("negative", "否定", "Negative", "du"),
];

const NEGATIVE: Facet = POLARITIES[1];

const VERBAL_CATEGORIES: [Facet; 3] = [
    Facet::new("adjective", "", "", "a"),
    Facet::new("adverb", "", "", "o"),
    Facet::new("nonverbAdverb", "", "", "io"),
];

const NOMINAL_CATEGORIES: [Facet; 1] = [Facet::new("adjective", "", "", "a")];

const ADPREDICATIVE_CATEGORIES: [Facet; 2] = [
    Facet::new("adpredicative", "", "", "e"),
    Facet::new("nonverbAdpredicative", "", "", "ie"),
];

const SPECIAL_CATEGORIES: [Facet; 1] = [Facet::new("special", "", "", "e")];

const PARTICLE_FORMS: [Facet; 1] = [Facet::new("nonverb", "非動詞修飾", "Nonverb-modifying", "i")];

pub(crate) fn description_name(description: SuggestionDescription, language: &str) -> Option<&'static str> {
    let type_ = description.type_;
    match description.kind {
        "category" => facet_name(&CATEGORIES, type_, language),
        "tense" => facet_name(&TENSES, type_, language),
        "aspect" => facet_name(ASPECTS.iter().map(|(facet, _)| facet), type_, language),
        "voice" => facet_name(&VOICES, type_, language),
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
                for (voice, aspect_suffix) in VOICES.iter().zip(suffixes) {
                    for polarity in &POLARITIES {
                        let suffix = format!("{}{}", tense.affix, aspect_suffix);
                        let descriptions = vec![
                            SuggestionDescription::new("category", "verb"),
                            SuggestionDescription::new("tense", tense.type_),
                            SuggestionDescription::new("aspect", aspect.type_),
                            SuggestionDescription::new("voice", voice.type_),
                            SuggestionDescription::new("polarity", polarity.type_),
                        ];
                        self.push(InflectionKind::Verbal, polarity.affix, &suffix, descriptions);
                    }
                }
            }
        }
    }

    fn prepare_negative_noun(&mut self, kind: InflectionKind) {
        let descriptions = vec![
            SuggestionDescription::new("category", "noun"),
            SuggestionDescription::new("polarity", NEGATIVE.type_),
        ];
        self.push(kind, NEGATIVE.affix, "", descriptions);
    }

    /// Candidates for a category prefix followed by a polarity prefix.
    fn prepare_prefixed(&mut self, kind: InflectionKind, categories: &[Facet]) {
        for category in categories {
            for polarity in &POLARITIES {
                let prefix = format!("{}{}", category.affix, polarity.affix);
                let descriptions = vec![
                    SuggestionDescription::new("category", category.type_),
                    SuggestionDescription::new("polarity", polarity.type_),
                ];
                self.push(kind, &prefix, "", descriptions);
            }
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
        self.prepare_negative_noun(InflectionKind::Verbal);
        self.prepare_prefixed(InflectionKind::Verbal, &VERBAL_CATEGORIES);
        self.prepare_prefixed(InflectionKind::Nominal, &NOMINAL_CATEGORIES);
        self.prepare_negative_noun(InflectionKind::Nominal);
        self.prepare_prefixed(InflectionKind::Adpredicative, &ADPREDICATIVE_CATEGORIES);
        self.prepare_prefixed(InflectionKind::Special, &SPECIAL_CATEGORIES);
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
            SuggestionKind::ShalInflection,
        )
    }
}
