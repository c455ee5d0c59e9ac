use std::path::Path;
use std::vec;

use tracing::{debug, info};

use crate::audio::{AudioDecoder, WavDecoder};
use crate::config::Language;
use crate::corpus::{language_pair_dir, read_lines, read_segments, Segment, Split, SplitPaths};
use crate::error::Result;

use super::record::{AudioField, ExampleRecord};

/// Position-wise join of a split's three resources.
///
/// Yields `(source, target, segment)` until any of the three runs out; the
/// remainder of the longer sequences is dropped without a diagnostic.
#[derive(Debug)]
struct AlignedTriples {
    sources: vec::IntoIter<String>,
    targets: vec::IntoIter<String>,
    segments: vec::IntoIter<Segment>,
}

impl Iterator for AlignedTriples {
    type Item = (String, String, Segment);

    fn next(&mut self) -> Option<Self::Item> {
        let source = self.sources.next()?;
        let target = self.targets.next()?;
        let segment = self.segments.next()?;
        Some((source, target, segment))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self
            .sources
            .len()
            .min(self.targets.len())
            .min(self.segments.len());
        (n, Some(n))
    }
}

/// Lazily produces the `(index, record)` pairs of one split.
///
/// Text and segment metadata are read when the generator is opened; audio is
/// decoded one record at a time as the caller pulls. After the first error the
/// generator is exhausted.
pub struct ExampleGenerator<D = WavDecoder> {
    split: Split,
    paths: SplitPaths,
    triples: AlignedTriples,
    decoder: D,
    next_index: usize,
    exhausted: bool,
}

/// Open the examples of `split` for `language` under `root`.
pub fn generate_examples(root: &Path, language: Language, split: Split) -> Result<ExampleGenerator> {
    ExampleGenerator::open(root, language, split)
}

impl ExampleGenerator<WavDecoder> {
    pub fn open(root: &Path, language: Language, split: Split) -> Result<Self> {
        Self::with_decoder(root, language, split, WavDecoder::default())
    }
}

impl<D: AudioDecoder> ExampleGenerator<D> {
    pub fn with_decoder(root: &Path, language: Language, split: Split, decoder: D) -> Result<Self> {
        let pair_dir = language_pair_dir(root, language)?;
        let paths = SplitPaths::new(&pair_dir, language, split);

        let segments = read_segments(&paths.segments)?;
        let sources = read_lines(&paths.source)?;
        let targets = read_lines(&paths.target)?;

        debug!(
            "Opened {} split of {}: {} segments, {} source lines, {} target lines, decoding at {} Hz",
            split,
            language.pair_dir(),
            segments.len(),
            sources.len(),
            targets.len(),
            decoder.sampling_rate()
        );

        Ok(Self {
            split,
            paths,
            triples: AlignedTriples {
                sources: sources.into_iter(),
                targets: targets.into_iter(),
                segments: segments.into_iter(),
            },
            decoder,
            next_index: 0,
            exhausted: false,
        })
    }

    pub fn split(&self) -> Split {
        self.split
    }

    pub fn paths(&self) -> &SplitPaths {
        &self.paths
    }

    fn build_record(&self, source: String, target: String, segment: Segment) -> Result<ExampleRecord> {
        let wav_path = self.paths.wav_path(&segment.wav);
        let decoded = self
            .decoder
            .load_window(&wav_path, segment.offset, segment.duration)?;

        Ok(ExampleRecord {
            duration: segment.duration,
            offset: segment.offset,
            speaker_id: segment.speaker_id,
            doc_id: segment.wav.clone(),
            audio: AudioField {
                array: decoded.samples,
                path: segment.wav,
                sampling_rate: decoded.sampling_rate,
            },
            transcript: source.trim().to_string(),
            translation: target.trim().to_string(),
        })
    }
}

impl<D: AudioDecoder> Iterator for ExampleGenerator<D> {
    type Item = Result<(usize, ExampleRecord)>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }

        let Some((source, target, segment)) = self.triples.next() else {
            self.exhausted = true;
            info!("Generated {} examples for {} split", self.next_index, self.split);
            return None;
        };

        match self.build_record(source, target, segment) {
            Ok(record) => {
                let index = self.next_index;
                self.next_index += 1;
                Some(Ok((index, record)))
            }
            Err(e) => {
                self.exhausted = true;
                Some(Err(e))
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.exhausted {
            return (0, Some(0));
        }
        // A decode failure can end the sequence early.
        (0, self.triples.size_hint().1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::DecodedAudio;
    use crate::error::MustcError;
    use std::cell::RefCell;
    use std::path::PathBuf;

    /// Returns silence of the requested length and remembers what was asked for.
    #[derive(Default)]
    struct SilentDecoder {
        calls: RefCell<Vec<(PathBuf, f64, f64)>>,
        fail_on: Option<usize>,
    }

    impl AudioDecoder for SilentDecoder {
        fn load_window(&self, path: &Path, offset: f64, duration: f64) -> Result<DecodedAudio> {
            let mut calls = self.calls.borrow_mut();
            if self.fail_on == Some(calls.len()) {
                return Err(MustcError::Resample("stub failure".to_string()));
            }
            calls.push((path.to_path_buf(), offset, duration));
            Ok(DecodedAudio {
                samples: vec![0.0; (duration * 16000.0).round() as usize],
                sampling_rate: 16000,
            })
        }

        fn sampling_rate(&self) -> u32 {
            16000
        }
    }

    fn write_split(root: &Path, yaml: &str, source: &str, target: &str) {
        let txt = root.join("en-fr/data/dev/txt");
        std::fs::create_dir_all(&txt).unwrap();
        std::fs::write(txt.join("dev.yaml"), yaml).unwrap();
        std::fs::write(txt.join("dev.en"), source).unwrap();
        std::fs::write(txt.join("dev.fr"), target).unwrap();
    }

    const TWO_SEGMENTS: &str = "\
- {duration: 2.5, offset: 0.0, speaker_id: spk1, wav: talk1.wav}
- {duration: 1.25, offset: 3.0, speaker_id: spk1, wav: talk1.wav}
";

    #[test]
    fn test_generates_trimmed_records() {
        let root = tempfile::tempdir().unwrap();
        write_split(
            root.path(),
            TWO_SEGMENTS,
            " Hello world. \nGoodbye.\n",
            "Bonjour le monde.\n\tAu revoir.  \n",
        );

        let generator =
            ExampleGenerator::with_decoder(root.path(), Language::Fr, Split::Validation, SilentDecoder::default())
                .unwrap();
        let records: Vec<(usize, ExampleRecord)> = generator.collect::<Result<_>>().unwrap();

        assert_eq!(records.len(), 2);
        let (index, first) = &records[0];
        assert_eq!(*index, 0);
        assert_eq!(first.transcript, "Hello world.");
        assert_eq!(first.translation, "Bonjour le monde.");
        assert_eq!(first.doc_id, "talk1.wav");
        assert_eq!(first.audio.path, "talk1.wav");
        assert_eq!(first.audio.sampling_rate, 16000);
        assert_eq!(first.audio.array.len(), 40000);

        let (index, second) = &records[1];
        assert_eq!(*index, 1);
        assert_eq!(second.translation, "Au revoir.");
        assert_eq!(second.doc_id, first.doc_id);
        assert_eq!(second.offset, 3.0);
        assert_eq!(second.duration, 1.25);
    }

    #[test]
    fn test_decoder_receives_wav_window() {
        let root = tempfile::tempdir().unwrap();
        write_split(root.path(), TWO_SEGMENTS, "a\nb\n", "c\nd\n");

        let mut generator =
            ExampleGenerator::with_decoder(root.path(), Language::Fr, Split::Validation, SilentDecoder::default())
                .unwrap();
        generator.next().unwrap().unwrap();

        let calls = generator.decoder.calls.borrow();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, root.path().join("en-fr/data/dev/wav/talk1.wav"));
        assert_eq!(calls[0].1, 0.0);
        assert_eq!(calls[0].2, 2.5);
    }

    #[test]
    fn test_truncates_to_shortest() {
        let root = tempfile::tempdir().unwrap();
        write_split(root.path(), TWO_SEGMENTS, "one\ntwo\nthree\n", "un\n");

        let generator =
            ExampleGenerator::with_decoder(root.path(), Language::Fr, Split::Validation, SilentDecoder::default())
                .unwrap();
        assert_eq!(generator.size_hint(), (0, Some(1)));

        let records: Vec<_> = generator.collect::<Result<Vec<_>>>().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].1.transcript, "one");
    }

    #[test]
    fn test_exhausted_after_error() {
        let root = tempfile::tempdir().unwrap();
        write_split(root.path(), TWO_SEGMENTS, "a\nb\n", "c\nd\n");

        let decoder = SilentDecoder {
            fail_on: Some(0),
            ..Default::default()
        };
        let mut generator =
            ExampleGenerator::with_decoder(root.path(), Language::Fr, Split::Validation, decoder).unwrap();

        assert!(matches!(generator.next(), Some(Err(MustcError::Resample(_)))));
        assert!(generator.next().is_none());
        assert!(generator.next().is_none());
    }

    #[test]
    fn test_missing_root_fails_before_reading() {
        let root = tempfile::tempdir().unwrap();
        let result = ExampleGenerator::with_decoder(
            &root.path().join("missing"),
            Language::Fr,
            Split::Validation,
            SilentDecoder::default(),
        );
        assert!(matches!(result, Err(MustcError::DataDirNotFound { .. })));
    }

    #[test]
    fn test_missing_split_files() {
        let root = tempfile::tempdir().unwrap();
        std::fs::create_dir(root.path().join("en-fr")).unwrap();

        let result =
            ExampleGenerator::with_decoder(root.path(), Language::Fr, Split::Train, SilentDecoder::default());
        assert!(matches!(result, Err(MustcError::Io { .. })));
    }

    #[test]
    fn test_malformed_yaml() {
        let root = tempfile::tempdir().unwrap();
        write_split(root.path(), "- {wav: talk1.wav, offset: [\n", "a\n", "b\n");

        let result =
            ExampleGenerator::with_decoder(root.path(), Language::Fr, Split::Validation, SilentDecoder::default());
        assert!(matches!(result, Err(MustcError::Yaml { .. })));
    }
}
