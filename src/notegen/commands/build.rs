//! # Build
//!
//! Repairs the note map and writes the note tree:
//!
//! ```text
//! <target>/
//! ├── Old_Note/
//! │   ├── Old_Note.dat     # note.dat template
//! │   └── english.dat      # language.dat template, one per requested language
//! └── ...
//! ```
//!
//! Notes are processed one at a time in map order. For each note the ID and
//! GUID are reconciled, the folder name is planned, and the primary and
//! language files are rendered. After the last note a real run writes the
//! repaired map back to the file it came from.
//!
//! A dry run walks the same steps and reports the same diagnostics, but never
//! touches the filesystem and never saves.
//!
//! Writes are not transactional. If a later note fails, files already written
//! stay on disk and the map is not saved, so generated IDs and GUIDs from that
//! run are lost.

use super::{CmdMessage, CmdResult};
use crate::codec;
use crate::error::{NotegenError, Result};
use crate::identity::{self, IdentitySource};
use crate::model::{Note, RunMode};
use crate::naming::{plan_name, validate_target_dir};
use crate::progress::Progress;
use crate::render::Templates;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const DEFAULT_CONFIG_PATH: &str = "./map.yml";
pub const DEFAULT_LANGUAGE: &str = "english";

#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// The note map, `.yml`, `.yaml` or `.json`
    pub config: PathBuf,
    /// Language tags to write `<language>.dat` files for
    pub languages: Vec<String>,
    pub mode: RunMode,
    /// Root folder of the generated tree
    pub target: PathBuf,
}

impl BuildOptions {
    pub fn new(target: impl Into<PathBuf>) -> Self {
        Self {
            config: PathBuf::from(DEFAULT_CONFIG_PATH),
            languages: vec![DEFAULT_LANGUAGE.to_string()],
            mode: RunMode::Real,
            target: target.into(),
        }
    }

    pub fn with_config(mut self, config: impl Into<PathBuf>) -> Self {
        self.config = config.into();
        self
    }

    pub fn with_languages<I, L>(mut self, languages: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<String>,
    {
        self.languages = languages.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_mode(mut self, mode: RunMode) -> Self {
        self.mode = mode;
        self
    }
}

struct NotePass<'a, S: ?Sized, P: ?Sized> {
    options: &'a BuildOptions,
    templates: &'a Templates,
    identity: &'a mut S,
    progress: &'a mut P,
    result: CmdResult,
}

pub fn run<S, P>(
    options: &BuildOptions,
    templates: &Templates,
    identity: &mut S,
    progress: &mut P,
) -> Result<CmdResult>
where
    S: IdentitySource + ?Sized,
    P: Progress + ?Sized,
{
    validate_target_dir(&options.target)?;
    let mut collection = codec::load(&options.config)?;

    let mut pass = NotePass {
        options,
        templates,
        identity,
        progress,
        result: CmdResult::default(),
    };
    pass.prepare_target()?;

    pass.progress.start(collection.notes.len());
    let outcome = collection.notes.iter_mut().try_for_each(|note| {
        pass.build_note(note)?;
        pass.progress.advance();
        Ok::<(), NotegenError>(())
    });
    pass.progress.finish();
    outcome?;

    if options.mode == RunMode::Real {
        pass.emit(CmdMessage::info("saving config file"));
        codec::save(&options.config, &collection)?;
        pass.result.saved = true;
        info!(path = %options.config.display(), "config saved");
        pass.emit(CmdMessage::success(format!(
            "Built {} note(s) in {}",
            collection.notes.len(),
            options.target.display()
        )));
    }

    Ok(pass.result)
}

impl<S, P> NotePass<'_, S, P>
where
    S: IdentitySource + ?Sized,
    P: Progress + ?Sized,
{
    fn is_dry(&self) -> bool {
        self.options.mode.is_dry()
    }

    /// Hand a message to the caller now and keep it in the result.
    fn emit(&mut self, message: CmdMessage) {
        self.progress.message(&message);
        self.result.add_message(message);
    }

    fn prepare_target(&mut self) -> Result<()> {
        let target = self.options.target.clone();
        if self.is_dry() {
            if !target.exists() {
                self.emit(CmdMessage::info(format!(
                    "Creating folder {}",
                    target.display()
                )));
            }
            return Ok(());
        }

        if !target.exists() {
            fs::create_dir_all(&target)?;
            debug!(path = %target.display(), "created target folder");
        }
        self.emit(CmdMessage::info(format!(
            "Building notes in {}",
            target.display()
        )));
        Ok(())
    }

    fn build_note(&mut self, note: &mut Note) -> Result<()> {
        let messages = identity::reconcile(note, self.options.mode, &mut *self.identity);
        for message in messages {
            self.emit(message);
        }

        let segment = plan_name(&note.name);
        if segment.is_empty() {
            let err = NotegenError::EmptyName(note.name.clone());
            if self.is_dry() {
                self.emit(CmdMessage::error(err.to_string()));
                return Ok(());
            }
            return Err(err);
        }

        let note_dir = self.options.target.join(&segment);
        let length = match note.primary_length() {
            Ok(length) => Some(length),
            Err(err) if self.is_dry() => {
                self.emit(CmdMessage::warning(err.to_string()));
                None
            }
            Err(err) => return Err(err),
        };

        self.ensure_note_dir(&note_dir)?;

        let primary = note_dir.join(format!("{}.dat", segment));
        if let (Some(length), false) = (length, self.is_dry()) {
            let content = self.templates.render_note(note, length)?;
            self.write_file(&primary, &content)?;
        } else {
            self.preview_file(&primary);
        }

        for lang in &note.text {
            if !self.options.languages.contains(&lang.language) {
                debug!(note = %note.name, language = %lang.language, "language not requested");
                self.emit(CmdMessage::info(format!(
                    "skipping {} for \"{}\"",
                    lang.language, note.name
                )));
                continue;
            }

            let lang_segment = plan_name(&lang.language);
            if lang_segment.is_empty() {
                self.emit(CmdMessage::warning(format!(
                    "skipping language \"{}\" of \"{}\": no usable file name",
                    lang.language, note.name
                )));
                continue;
            }
            // case-insensitive filesystems would collide too
            if lang_segment.to_lowercase() == segment.to_lowercase() {
                self.emit(CmdMessage::warning(format!(
                    "skipping language \"{}\" of \"{}\": {}.dat is the note file",
                    lang.language, note.name, segment
                )));
                continue;
            }

            let path = note_dir.join(format!("{}.dat", lang_segment));
            if self.is_dry() {
                self.preview_file(&path);
            } else {
                let content = self.templates.render_language(lang, &note.name)?;
                self.write_file(&path, &content)?;
            }
        }

        let missing: Vec<String> = self
            .options
            .languages
            .iter()
            .filter(|requested| !note.has_language(requested))
            .map(|requested| format!("\"{}\" has no {} text", note.name, requested))
            .collect();
        for warning in missing {
            self.emit(CmdMessage::warning(warning));
        }

        Ok(())
    }

    fn ensure_note_dir(&mut self, dir: &Path) -> Result<()> {
        if dir.exists() {
            return Ok(());
        }
        if self.is_dry() {
            self.emit(CmdMessage::info(format!("Note dir at {}", dir.display())));
        } else {
            fs::create_dir_all(dir)?;
            debug!(path = %dir.display(), "created note folder");
        }
        self.result.directories.push(dir.to_path_buf());
        Ok(())
    }

    fn preview_file(&mut self, path: &Path) {
        self.emit(CmdMessage::info(format!(
            "Generating file {}",
            path.display()
        )));
        self.result.files.push(path.to_path_buf());
    }

    fn write_file(&mut self, path: &Path, content: &str) -> Result<()> {
        fs::write(path, content)?;
        debug!(path = %path.display(), bytes = content.len(), "wrote file");
        self.result.files.push(path.to_path_buf());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::identity::SequenceIdentitySource;
    use crate::model::{Language, NoteCollection};
    use crate::progress::{CountingProgress, NoProgress};
    use std::collections::BTreeMap;

    fn templates() -> Templates {
        Templates::from_sources(
            "{{ note.id }}|{{ note.guid }}|{{ length }}",
            "{{ name }}:{{ language.text | join(' ') }}",
        )
        .unwrap()
    }

    fn two_languages(name: &str) -> Note {
        Note::new(name)
            .with_language(Language::new("en", vec!["Hello".into(), "there".into()]))
            .with_language(Language::new("fr", vec!["Salut".into()]))
    }

    fn write_map(dir: &Path, file: &str, notes: Vec<Note>) -> PathBuf {
        let path = dir.join(file);
        let collection = NoteCollection {
            name: Some("test".into()),
            notes,
        };
        codec::save(&path, &collection).unwrap();
        path
    }

    /// Every file under `root` with its content, keyed by relative path.
    fn snapshot(root: &Path) -> BTreeMap<PathBuf, Vec<u8>> {
        let mut out = BTreeMap::new();
        if !root.exists() {
            return out;
        }
        let mut stack = vec![root.to_path_buf()];
        while let Some(dir) = stack.pop() {
            for entry in fs::read_dir(&dir).unwrap() {
                let path = entry.unwrap().path();
                let rel = path.strip_prefix(root).unwrap().to_path_buf();
                if path.is_dir() {
                    out.insert(rel, Vec::new());
                    stack.push(path);
                } else {
                    out.insert(rel, fs::read(&path).unwrap());
                }
            }
        }
        out
    }

    fn build(options: &BuildOptions) -> Result<CmdResult> {
        run(
            options,
            &templates(),
            &mut SequenceIdentitySource::new(10_000),
            &mut NoProgress,
        )
    }

    #[test]
    fn real_run_writes_requested_languages_and_saves_ids() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_map(dir.path(), "map.yml", vec![two_languages("Old Note")]);
        let target = dir.path().join("out");

        let options = BuildOptions::new(&target)
            .with_config(&config)
            .with_languages(["en"]);
        let result = build(&options).unwrap();

        let note_dir = target.join("Old_Note");
        let mut entries: Vec<String> = fs::read_dir(&note_dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        entries.sort();
        assert_eq!(entries, vec!["Old_Note.dat", "en.dat"]);

        assert_eq!(
            fs::read_to_string(note_dir.join("Old_Note.dat")).unwrap(),
            "10000|00000000000000000000000000000001|1"
        );
        assert_eq!(
            fs::read_to_string(note_dir.join("en.dat")).unwrap(),
            "Old Note:Hello there"
        );

        assert!(result.saved);
        let saved = codec::load(&config).unwrap();
        assert_eq!(saved.notes[0].id, Some(10_000));
        assert_eq!(
            saved.notes[0].guid.as_deref(),
            Some("00000000000000000000000000000001")
        );
        assert_eq!(saved.notes[0].text, two_languages("Old Note").text);
    }

    #[test]
    fn dry_run_changes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_map(
            dir.path(),
            "map.json",
            vec![two_languages("Old Note"), Note::new("Short")],
        );
        let target = dir.path().join("out");
        let before = snapshot(dir.path());

        let options = BuildOptions::new(&target)
            .with_config(&config)
            .with_languages(["en", "fr"])
            .with_mode(RunMode::DryRun);
        let result = build(&options).unwrap();

        assert_eq!(snapshot(dir.path()), before);
        assert!(!target.exists());
        assert!(!result.saved);
        assert!(result
            .files
            .contains(&target.join("Old_Note").join("Old_Note.dat")));
        assert!(result.files.contains(&target.join("Old_Note").join("fr.dat")));
    }

    #[test]
    fn dry_run_reports_missing_identity_without_assigning() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_map(dir.path(), "map.yml", vec![two_languages("Old Note")]);

        let options = BuildOptions::new(dir.path().join("out"))
            .with_config(&config)
            .with_mode(RunMode::DryRun);
        let result = build(&options).unwrap();

        let warnings: Vec<_> = result.warnings().map(|m| m.content.as_str()).collect();
        assert!(warnings.iter().any(|w| w.contains("does not have an ID")));
        assert!(warnings.iter().any(|w| w.contains("would have a GUID")));
        assert_eq!(codec::load(&config).unwrap().notes[0].id, None);
    }

    #[test]
    fn dry_run_warns_about_short_notes_and_continues() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_map(
            dir.path(),
            "map.yml",
            vec![Note::new("Short").with_id(3000), two_languages("After")],
        );
        let mut progress = CountingProgress::default();

        let options = BuildOptions::new(dir.path().join("out"))
            .with_config(&config)
            .with_mode(RunMode::DryRun);
        let result = run(
            &options,
            &templates(),
            &mut SequenceIdentitySource::new(10_000),
            &mut progress,
        )
        .unwrap();

        assert!(result
            .warnings()
            .any(|m| m.content.contains("needs at least 2 language entries")));
        assert_eq!(progress.done, 2);
        assert!(progress.finished);
    }

    #[test]
    fn real_run_aborts_on_short_note_without_saving() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_map(
            dir.path(),
            "map.yml",
            vec![
                two_languages("First"),
                Note::new("Short").with_language(Language::new("en", vec![])),
                two_languages("Never"),
            ],
        );
        let target = dir.path().join("out");
        let mut progress = CountingProgress::default();

        let options = BuildOptions::new(&target)
            .with_config(&config)
            .with_languages(["en"]);
        let err = run(
            &options,
            &templates(),
            &mut SequenceIdentitySource::new(10_000),
            &mut progress,
        )
        .unwrap_err();

        assert!(matches!(
            err,
            NotegenError::IndexMissing { ref note, found: 1 } if note == "Short"
        ));
        assert!(target.join("First").join("First.dat").exists());
        assert!(!target.join("Short").exists());
        assert!(!target.join("Never").exists());
        assert_eq!(codec::load(&config).unwrap().notes[0].id, None);
        assert_eq!(progress.done, 1);
        assert!(progress.finished);
    }

    #[test]
    fn out_of_range_ids_warn_but_build() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_map(
            dir.path(),
            "map.yml",
            vec![
                two_languages("Big").with_id(70_000).with_guid("a".repeat(32)),
                two_languages("Small").with_id(500).with_guid("b".repeat(32)),
            ],
        );
        let target = dir.path().join("out");

        let options = BuildOptions::new(&target).with_config(&config);
        let result = build(&options).unwrap();

        let warnings: Vec<_> = result.warnings().map(|m| m.content.clone()).collect();
        assert!(warnings.iter().any(|w| w.contains("greater than that allowed")));
        assert!(warnings.iter().any(|w| w.contains("less than the recommended")));
        assert!(target.join("Big").join("Big.dat").exists());
        assert!(target.join("Small").join("Small.dat").exists());

        let saved = codec::load(&config).unwrap();
        assert_eq!(saved.notes[0].id, Some(70_000));
        assert_eq!(saved.notes[1].id, Some(500));
    }

    #[test]
    fn skipped_and_absent_languages_are_reported_in_both_modes() {
        for mode in [RunMode::Real, RunMode::DryRun] {
            let dir = tempfile::tempdir().unwrap();
            let config = write_map(dir.path(), "map.yml", vec![two_languages("Note")]);

            let options = BuildOptions::new(dir.path().join("out"))
                .with_config(&config)
                .with_languages(["en", "de"])
                .with_mode(mode);
            let result = build(&options).unwrap();

            assert!(result.messages.iter().any(|m| {
                m.level == MessageLevel::Info && m.content == "skipping fr for \"Note\""
            }));
            assert!(result
                .warnings()
                .any(|m| m.content == "\"Note\" has no de text"));
        }
    }

    #[test]
    fn existing_note_folder_is_kept() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_map(dir.path(), "map.yml", vec![two_languages("Old Note")]);
        let note_dir = dir.path().join("out").join("Old_Note");
        fs::create_dir_all(&note_dir).unwrap();
        fs::write(note_dir.join("keep.txt"), "mine").unwrap();

        let options = BuildOptions::new(dir.path().join("out"))
            .with_config(&config)
            .with_languages(["en"]);
        let result = build(&options).unwrap();

        assert_eq!(fs::read_to_string(note_dir.join("keep.txt")).unwrap(), "mine");
        assert!(note_dir.join("Old_Note.dat").exists());
        assert!(result.directories.is_empty());
    }

    #[test]
    fn unnamed_note_fails_real_run() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_map(dir.path(), "map.yml", vec![two_languages("???")]);

        let options = BuildOptions::new(dir.path().join("out")).with_config(&config);
        assert!(matches!(build(&options), Err(NotegenError::EmptyName(_))));
    }

    #[test]
    fn unrecognized_config_extension_fails_before_target_is_created() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("map.txt");
        fs::write(&config, "notes: []").unwrap();
        let target = dir.path().join("out");

        let options = BuildOptions::new(&target).with_config(&config);
        assert!(matches!(
            build(&options),
            Err(NotegenError::FormatUnrecognized(_))
        ));
        assert!(!target.exists());
    }

    #[test]
    fn invalid_target_fails_before_loading() {
        let dir = tempfile::tempdir().unwrap();
        let options = BuildOptions::new(dir.path().join("x".repeat(300)))
            .with_config(dir.path().join("absent.yml"));
        assert!(matches!(
            build(&options),
            Err(NotegenError::InvalidTargetPath { .. })
        ));
    }

    #[test]
    fn defaults_match_cli_defaults() {
        let options = BuildOptions::new("notes");
        assert_eq!(options.config, PathBuf::from("./map.yml"));
        assert_eq!(options.languages, vec!["english".to_string()]);
        assert_eq!(options.mode, RunMode::Real);
    }

    #[test]
    fn messages_reach_progress_before_a_failing_note() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_map(
            dir.path(),
            "map.yml",
            vec![
                two_languages("First"),
                Note::new("Short").with_language(Language::new("en", vec![])),
            ],
        );
        let mut progress = CountingProgress::default();

        let options = BuildOptions::new(dir.path().join("out"))
            .with_config(&config)
            .with_languages(["en"]);
        let result = run(
            &options,
            &templates(),
            &mut SequenceIdentitySource::new(10_000),
            &mut progress,
        );

        assert!(matches!(result, Err(NotegenError::IndexMissing { .. })));
        assert!(progress.messages.iter().any(|m| {
            m.level == MessageLevel::Warning
                && m.content == "\"First\" has been randomly assigned the ID 10000. You should change this."
        }));
        assert!(progress
            .messages
            .iter()
            .any(|m| m.content.contains("00000000000000000000000000000001")));
    }

    #[test]
    fn progress_sees_the_same_messages_as_the_result() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_map(dir.path(), "map.yml", vec![two_languages("Old Note")]);
        let mut progress = CountingProgress::default();

        let options = BuildOptions::new(dir.path().join("out")).with_config(&config);
        let result = run(
            &options,
            &templates(),
            &mut SequenceIdentitySource::new(10_000),
            &mut progress,
        )
        .unwrap();

        assert_eq!(progress.messages, result.messages);
    }

    #[test]
    fn language_named_like_the_note_keeps_the_note_file() {
        for mode in [RunMode::Real, RunMode::DryRun] {
            let dir = tempfile::tempdir().unwrap();
            let note = Note::new("english")
                .with_language(Language::new("English", vec!["a".into()]))
                .with_language(Language::new("fr", vec!["b".into()]));
            let config = write_map(dir.path(), "map.yml", vec![note]);
            let target = dir.path().join("out");

            let options = BuildOptions::new(&target)
                .with_config(&config)
                .with_languages(["English"])
                .with_mode(mode);
            let result = build(&options).unwrap();

            assert!(result
                .warnings()
                .any(|m| m.content.contains("english.dat is the note file")));
            let primary = target.join("english").join("english.dat");
            assert_eq!(
                result.files.iter().filter(|f| **f == primary).count(),
                1
            );
            if mode == RunMode::Real {
                assert_eq!(
                    fs::read_to_string(&primary).unwrap(),
                    "10000|00000000000000000000000000000001|1"
                );
            }
        }
    }

    #[test]
    fn language_without_usable_file_name_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let note = Note::new("Note")
            .with_language(Language::new("???", vec!["a".into()]))
            .with_language(Language::new("fr", vec!["b".into()]));
        let config = write_map(dir.path(), "map.yml", vec![note]);
        let target = dir.path().join("out");

        let options = BuildOptions::new(&target)
            .with_config(&config)
            .with_languages(["???", "fr"]);
        let result = build(&options).unwrap();

        assert!(result
            .warnings()
            .any(|m| m.content.contains("no usable file name")));
        assert!(!target.join("Note").join(".dat").exists());
        assert!(target.join("Note").join("fr.dat").exists());
    }

    #[test]
    fn colliding_note_names_last_write_wins() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_map(
            dir.path(),
            "map.yml",
            vec![
                two_languages("Old Note").with_id(3001).with_guid("1".repeat(32)),
                two_languages(" Old_Note").with_id(3002).with_guid("2".repeat(32)),
            ],
        );
        let target = dir.path().join("out");

        let options = BuildOptions::new(&target)
            .with_config(&config)
            .with_languages(["en"]);
        build(&options).unwrap();

        let folders: Vec<_> = fs::read_dir(&target).unwrap().collect();
        assert_eq!(folders.len(), 1);
        assert_eq!(
            fs::read_to_string(target.join("Old_Note").join("Old_Note.dat")).unwrap(),
            format!("3002|{}|1", "2".repeat(32))
        );
        assert_eq!(
            fs::read_to_string(target.join("Old_Note").join("en.dat")).unwrap(),
            " Old_Note:Hello there"
        );
    }

    #[test]
    fn colliding_note_names_are_both_previewed() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_map(
            dir.path(),
            "map.yml",
            vec![two_languages("Old Note"), two_languages(" Old_Note")],
        );
        let target = dir.path().join("out");

        let options = BuildOptions::new(&target)
            .with_config(&config)
            .with_mode(RunMode::DryRun);
        let result = build(&options).unwrap();

        let primary = target.join("Old_Note").join("Old_Note.dat");
        assert_eq!(result.files.iter().filter(|f| **f == primary).count(), 2);
        assert!(!target.exists());
    }
}
