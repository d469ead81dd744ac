//! Per-cut track export.

use crate::dsp::ChunkResampler;
use crate::error::{ExportError, Result};
use crate::format::wav::{TrackWriter, WavConfig};
use crate::handle::ExportHandle;
use crate::options::{original_byte_budget, BitDepth, ExportSettings, OutputFormat};
use std::path::{Path, PathBuf};
use wavecut_core::{AudioMetadata, RawSamples, SourceReader, WavSource};
use wavecut_timeline::Cut;

/// Frames decoded per read on the conversion path.
const READ_FRAMES: usize = 4096;

/// Silence chunks fed after the source runs dry to drain the resampler.
const MAX_FLUSHES: usize = 16;

/// One written track file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedTrack {
    pub name: String,
    pub path: PathBuf,
    /// Frames written.
    pub frames: u64,
    /// Bytes of sample data written, excluding the header.
    pub bytes: u64,
}

/// Fluent builder for exporting the selected cuts of a source.
///
/// # Example
/// ```ignore
/// let tracks = CutExporter::new(source, "tracks")
///     .cuts(timeline.cuts())
///     .settings(ExportSettings::converted(48000, 24)?)
///     .run_with_progress(|pct| println!("{pct}%"))?;
/// ```
#[derive(Debug, Clone)]
pub struct CutExporter {
    source: WavSource,
    output_dir: PathBuf,
    cuts: Vec<Cut>,
    settings: ExportSettings,
    chunk_bytes: usize,
}

impl CutExporter {
    pub fn new(source: WavSource, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            source,
            output_dir: output_dir.into(),
            cuts: Vec::new(),
            settings: ExportSettings::default(),
            chunk_bytes: 4096,
        }
    }

    /// Cuts to consider; only selected ones are written, in order.
    pub fn cuts<'a>(mut self, cuts: impl IntoIterator<Item = &'a Cut>) -> Self {
        self.cuts = cuts.into_iter().cloned().collect();
        self
    }

    pub fn settings(mut self, settings: ExportSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Read size of the original-format copy path.
    pub fn chunk_bytes(mut self, bytes: usize) -> Self {
        self.chunk_bytes = bytes;
        self
    }

    pub fn run(self) -> Result<Vec<ExportedTrack>> {
        self.run_with_progress(|_| {})
    }

    /// Export and report progress as the percentage of cuts finished.
    pub fn run_with_progress(self, on_progress: impl FnMut(u8)) -> Result<Vec<ExportedTrack>> {
        export_cuts(
            &self.cuts,
            &self.source,
            &self.output_dir,
            &self.settings,
            self.chunk_bytes,
            on_progress,
        )
    }

    /// Run the export on a background thread.
    pub fn start(self) -> Result<ExportHandle> {
        let (tx, rx) = crossbeam_channel::bounded(64);
        let thread = std::thread::Builder::new()
            .name("wavecut-export".into())
            .spawn(move || {
                self.run_with_progress(|p| {
                    let _ = tx.try_send(p);
                })
            })?;
        Ok(ExportHandle::new(rx, thread))
    }
}

/// Write every selected cut to `output_dir` as `<name>.wav`.
///
/// Fails before writing anything when no cut is selected, the settings are
/// invalid or the directory is unusable. A failing cut aborts the batch;
/// tracks already written stay on disk. Existing files are overwritten.
pub fn export_cuts(
    cuts: &[Cut],
    source: &WavSource,
    output_dir: &Path,
    settings: &ExportSettings,
    chunk_bytes: usize,
    mut on_progress: impl FnMut(u8),
) -> Result<Vec<ExportedTrack>> {
    let selected: Vec<&Cut> = cuts.iter().filter(|c| c.selected).collect();
    if selected.is_empty() {
        return Err(ExportError::NothingSelected);
    }
    settings.validate()?;
    prepare_output_dir(output_dir)?;

    let metadata = source.metadata();
    let format = settings.output_format(&metadata);
    let mut tracks = Vec::with_capacity(selected.len());

    for (i, cut) in selected.iter().enumerate() {
        let path = output_dir.join(format!("{}.wav", file_stem(&cut.name)));
        if path.exists() {
            tracing::warn!(path = %path.display(), "overwriting existing track");
        }

        let track = export_one(cut, source, &path, format, settings, chunk_bytes)
            .map_err(|e| {
                tracing::warn!(cut = %cut.name, error = %e, "export failed");
                e.in_cut(&cut.name)
            })?;
        tracing::info!(
            cut = %cut.name,
            path = %track.path.display(),
            frames = track.frames,
            bytes = track.bytes,
            "exported track"
        );
        tracks.push(track);

        on_progress(((i + 1) * 100 / selected.len()) as u8);
    }

    Ok(tracks)
}

fn prepare_output_dir(dir: &Path) -> Result<()> {
    if dir.exists() && !dir.is_dir() {
        return Err(ExportError::InvalidDestination {
            path: dir.to_path_buf(),
            reason: "not a directory".to_string(),
        });
    }
    std::fs::create_dir_all(dir).map_err(|e| ExportError::InvalidDestination {
        path: dir.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Cut name with path separators and reserved characters replaced.
fn file_stem(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect()
}

fn export_one(
    cut: &Cut,
    source: &WavSource,
    path: &Path,
    format: OutputFormat,
    settings: &ExportSettings,
    chunk_bytes: usize,
) -> Result<ExportedTrack> {
    let metadata = source.metadata();
    let mut reader = source.reader()?;
    reader.seek(cut.start)?;

    let (frames, bytes) = match format {
        OutputFormat::Original => {
            let mut writer = TrackWriter::original(path, &metadata)?;
            let written = copy_original(&mut reader, &mut writer, &metadata, cut, chunk_bytes)?;
            writer.finalize()?;
            written
        }
        OutputFormat::Converted {
            sample_rate,
            bit_depth,
        } => {
            let config = WavConfig {
                sample_rate,
                bit_depth,
                channels: metadata.channels,
            };
            let mut writer = TrackWriter::converted(path, &config)?;
            let frames = convert(&mut reader, &mut writer, &metadata, cut, sample_rate, settings)?;
            writer.finalize()?;
            (frames, bytes_for(frames, metadata.channels, bit_depth))
        }
    };

    Ok(ExportedTrack {
        name: cut.name.clone(),
        path: path.to_path_buf(),
        frames,
        bytes,
    })
}

fn bytes_for(frames: u64, channels: u16, depth: BitDepth) -> u64 {
    frames * channels as u64 * depth.bytes_per_sample()
}

/// Copy the cut's frames unchanged, in chunks aligned to whole frames.
///
/// Stops at the byte budget or when the source runs out, whichever comes
/// first. Returns `(frames, bytes)` written.
fn copy_original(
    reader: &mut SourceReader,
    writer: &mut TrackWriter,
    metadata: &AudioMetadata,
    cut: &Cut,
    chunk_bytes: usize,
) -> Result<(u64, u64)> {
    let align = metadata.block_align() as u64;
    let channels = metadata.channels as usize;
    let budget = original_byte_budget(metadata, cut.length);
    let chunk = (chunk_bytes as u64 - chunk_bytes as u64 % align).max(align);

    let mut raw = RawSamples::for_kind(metadata.sample_kind);
    let mut written = 0u64;
    while written < budget {
        let take = chunk.min(budget - written);
        let frames = (take / align) as usize;
        let read = reader.read_raw(frames * channels, &mut raw)?;
        let whole = read - read % channels;
        if whole == 0 {
            break;
        }
        raw.truncate(whole);
        writer.write_raw(&raw)?;
        written += (whole / channels) as u64 * align;
    }

    Ok((written / align, written))
}

/// Decode, resample and requantize the cut. Returns frames written.
///
/// Output is `floor(length * target_rate)` frames unless the source ends
/// early.
fn convert(
    reader: &mut SourceReader,
    writer: &mut TrackWriter,
    metadata: &AudioMetadata,
    cut: &Cut,
    target_rate: u32,
    settings: &ExportSettings,
) -> Result<u64> {
    let channels = metadata.channels as usize;
    let needed = (cut.length.as_secs_f64() * target_rate as f64) as usize * channels;
    let mut remaining = metadata.frames_in(cut.length) as usize * channels;

    let mut resampler = if target_rate != metadata.sample_rate {
        Some(ChunkResampler::new(
            channels,
            metadata.sample_rate,
            target_rate,
            settings.resample_quality,
        )?)
    } else {
        None
    };

    let mut input = Vec::with_capacity(READ_FRAMES * channels);
    let mut output = Vec::new();
    let mut written = 0usize;
    let mut flushes = 0;

    while written < needed {
        input.clear();
        let want = remaining.min(READ_FRAMES * channels);
        let read = if want > 0 {
            reader.read_samples(want, &mut input)?
        } else {
            0
        };
        remaining -= read;
        input.truncate(read - read % channels);

        if input.is_empty() {
            match resampler.as_mut() {
                Some(r) if flushes < MAX_FLUSHES => {
                    r.flush(&mut output)?;
                    flushes += 1;
                }
                _ => break,
            }
        } else {
            match resampler.as_mut() {
                Some(r) => r.push_interleaved(&input, &mut output)?,
                None => output.extend_from_slice(&input),
            }
        }

        let take = output.len().min(needed - written);
        writer.write_converted(&output[..take])?;
        output.drain(..take);
        written += take;
    }

    Ok((written / channels) as u64)
}
