//! Major-triad chord templates
//!
//! Each template is a binary 12-element pitch-class profile. The bank is
//! generated from the triad rule (root, root+4, root+7 mod 12) rather than
//! transcribed by hand.

use crate::analysis::result::PitchClass;
use crate::error::AnalysisError;

/// Semitone offsets of a major triad above its root
pub const MAJOR_TRIAD_INTERVALS: [usize; 3] = [0, 4, 7];

/// A named binary pitch-class profile
#[derive(Debug, Clone, PartialEq)]
pub struct ChordTemplate {
    /// Chord root
    pub root: PitchClass,

    /// 1.0 at chord tones, 0.0 elsewhere
    pub weights: [f32; 12],
}

impl ChordTemplate {
    /// Major triad on `root`
    ///
    /// ```
    /// use stratum_chords::features::chords::templates::ChordTemplate;
    /// use stratum_chords::PitchClass;
    ///
    /// let g = ChordTemplate::major_triad(PitchClass::G);
    /// assert_eq!(g.chord_tones(), vec![2, 7, 11]); // D, G, B
    /// ```
    pub fn major_triad(root: PitchClass) -> Self {
        let mut weights = [0.0f32; 12];
        for interval in MAJOR_TRIAD_INTERVALS {
            weights[(root.index() + interval) % 12] = 1.0;
        }
        Self { root, weights }
    }

    /// Chord name; major quality is implied by the bare root
    pub fn name(&self) -> &'static str {
        self.root.name()
    }

    /// Active pitch-class indices, ascending
    pub fn chord_tones(&self) -> Vec<usize> {
        self.weights
            .iter()
            .enumerate()
            .filter(|(_, &w)| w > 0.0)
            .map(|(i, _)| i)
            .collect()
    }
}

/// Ordered collection of chord templates
///
/// Enumeration order is significant: the ranker breaks score ties by it.
#[derive(Debug, Clone)]
pub struct TemplateBank {
    templates: Vec<ChordTemplate>,
}

impl TemplateBank {
    /// The twelve major triads in chromatic order, C first
    pub fn major_triads() -> Self {
        Self {
            templates: PitchClass::ALL
                .iter()
                .map(|&root| ChordTemplate::major_triad(root))
                .collect(),
        }
    }

    /// Build a bank from explicit templates
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::Configuration` if `templates` is empty.
    pub fn new(templates: Vec<ChordTemplate>) -> Result<Self, AnalysisError> {
        if templates.is_empty() {
            return Err(AnalysisError::Configuration(
                "Template bank must contain at least one chord template".to_string(),
            ));
        }
        Ok(Self { templates })
    }

    /// Templates in enumeration order
    pub fn templates(&self) -> &[ChordTemplate] {
        &self.templates
    }

    /// Template for `root`, if the bank has one
    pub fn get(&self, root: PitchClass) -> Option<&ChordTemplate> {
        self.templates.iter().find(|t| t.root == root)
    }

    /// Number of templates
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// True if the bank has no templates
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl Default for TemplateBank {
    fn default() -> Self {
        Self::major_triads()
    }
}
