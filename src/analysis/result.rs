//! Analysis result types

use serde::{Deserialize, Serialize};

/// Pitch-class names in chromatic order, starting at C
pub const PITCH_CLASS_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// One of the twelve semitone categories, independent of octave
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PitchClass {
    /// C (index 0)
    C,
    /// C# (index 1)
    CSharp,
    /// D (index 2)
    D,
    /// D# (index 3)
    DSharp,
    /// E (index 4)
    E,
    /// F (index 5)
    F,
    /// F# (index 6)
    FSharp,
    /// G (index 7)
    G,
    /// G# (index 8)
    GSharp,
    /// A (index 9)
    A,
    /// A# (index 10)
    ASharp,
    /// B (index 11)
    B,
}

impl PitchClass {
    /// All pitch classes in chromatic order
    pub const ALL: [PitchClass; 12] = [
        PitchClass::C,
        PitchClass::CSharp,
        PitchClass::D,
        PitchClass::DSharp,
        PitchClass::E,
        PitchClass::F,
        PitchClass::FSharp,
        PitchClass::G,
        PitchClass::GSharp,
        PitchClass::A,
        PitchClass::ASharp,
        PitchClass::B,
    ];

    /// Pitch class for a semitone index; wraps modulo 12
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % 12]
    }

    /// Semitones above C (0-11)
    pub fn index(self) -> usize {
        self as usize
    }

    /// Note name in sharp notation (e.g. "C", "F#")
    ///
    /// ```
    /// use stratum_chords::PitchClass;
    ///
    /// assert_eq!(PitchClass::C.name(), "C");
    /// assert_eq!(PitchClass::from_index(6).name(), "F#");
    /// ```
    pub fn name(self) -> &'static str {
        PITCH_CLASS_NAMES[self.index()]
    }

    /// Pitch class `semitones` above this one
    pub fn transpose(self, semitones: usize) -> Self {
        Self::from_index(self.index() + semitones)
    }

    /// Parse a sharp-notation name ("C", "C#", ..., "B")
    pub fn from_name(name: &str) -> Option<Self> {
        PITCH_CLASS_NAMES
            .iter()
            .position(|&n| n == name)
            .map(Self::from_index)
    }
}

/// Musical key
///
/// Keys are always reported as major: the tonic is the pitch class with the
/// most chroma energy and no mode discrimination is attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Key {
    /// Tonic pitch class
    pub tonic: PitchClass,
}

impl Key {
    /// Major key on the given tonic
    pub fn major(tonic: PitchClass) -> Self {
        Self { tonic }
    }

    /// Key name (tonic only, e.g. "G")
    pub fn name(&self) -> &'static str {
        self.tonic.name()
    }

    /// Scale label (e.g. "G Major")
    ///
    /// ```
    /// use stratum_chords::{Key, PitchClass};
    ///
    /// assert_eq!(Key::major(PitchClass::G).scale_name(), "G Major");
    /// ```
    pub fn scale_name(&self) -> String {
        format!("{} Major", self.tonic.name())
    }
}

/// A chord name paired with its template similarity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChordScore {
    /// Chord name (root name, major quality implied)
    pub name: String,

    /// Root pitch class
    pub root: PitchClass,

    /// Dot product of the averaged chroma vector with the chord template
    pub score: f32,
}

/// Complete analysis result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Tempo estimate in BPM (0.0 when no periodicity was found)
    pub tempo: f32,

    /// Tempo confidence (0.0-1.0)
    pub tempo_confidence: f32,

    /// Detected key
    pub key: Key,

    /// Key confidence (0.0-1.0)
    pub key_confidence: f32,

    /// Ranked chords, best match first
    pub chords: Vec<ChordScore>,

    /// Averaged chroma vector the chords were ranked from
    pub mean_chroma: [f32; 12],

    /// Analysis metadata
    pub metadata: AnalysisMetadata,
}

impl AnalysisResult {
    /// Ranked chord names, best match first
    pub fn chord_names(&self) -> Vec<String> {
        self.chords.iter().map(|c| c.name.clone()).collect()
    }
}

/// Analysis metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisMetadata {
    /// Analysed audio duration in seconds
    pub duration_seconds: f32,

    /// Sample rate in Hz
    pub sample_rate: u32,

    /// Number of chroma frames
    pub chroma_frames: usize,

    /// Number of detected onsets
    pub onset_count: usize,

    /// Processing time in milliseconds
    pub processing_time_ms: f32,

    /// Algorithm version
    pub algorithm_version: String,

    /// Warnings about degraded results (no tempo found, ambiguous key, ...)
    pub warnings: Vec<String>,
}
