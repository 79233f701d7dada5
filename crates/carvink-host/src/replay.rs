//! Replay and convert commands.

use crate::cli::{ConvertArgs, ReplayArgs};
use crate::error::{HostError, HostResult, read_file};
use crate::script::{ScriptLine, parse_script};
use carvink_core::{CanvasConfig, CanvasDocument, CanvasEvent, CanvasSession, FileSink};

/// What a replay did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplaySummary {
    pub events: usize,
    pub directives: usize,
    pub persists: usize,
    pub paths: usize,
}

/// Mount a session, replay the script and persist the result.
///
/// A final persist is issued unless the script already ends with one.
pub fn run_replay(args: &ReplayArgs) -> HostResult<ReplaySummary> {
    let mut config = CanvasConfig::from_json(&read_file(&args.config)?)?;
    if let Some(content) = &args.content {
        config.drawing_content = Some(read_file(content)?);
    }
    let lines = parse_script(&read_file(&args.events)?, &args.events)?;

    let sink = match &args.out {
        Some(dir) => FileSink::new(dir.clone())?,
        None => FileSink::default_location()?,
    };
    let mut session = CanvasSession::mount(config, sink)?;

    let mut summary = ReplaySummary {
        events: 0,
        directives: 0,
        persists: 0,
        paths: 0,
    };
    let mut persisted_last = false;
    for line in lines {
        persisted_last = false;
        match line {
            ScriptLine::Directive(directive) => {
                log::debug!("Applying {directive:?}");
                directive.apply(&mut session);
                summary.directives += 1;
            }
            ScriptLine::Event(event) => {
                if event == CanvasEvent::Persist {
                    persisted_last = true;
                    summary.persists += 1;
                }
                session.handle_event(event)?;
                summary.events += 1;
            }
        }
    }
    if !persisted_last {
        session.persist()?;
        summary.persists += 1;
    }

    summary.paths = session.document().path_count();
    log::info!(
        "Replayed {} events into {}",
        summary.events,
        session.sink().base_path().display()
    );
    Ok(summary)
}

/// Convert a paper.js export into the native format. Returns the path count.
pub fn run_convert(args: &ConvertArgs) -> HostResult<usize> {
    let document = CanvasDocument::from_paper_json(&read_file(&args.input)?)?;
    let json = document.to_json()?;
    std::fs::write(&args.output, json).map_err(|source| HostError::Io {
        path: args.output.clone(),
        source,
    })?;
    log::info!(
        "Converted {} layers from {}",
        document.layers.len(),
        args.input.display()
    );
    Ok(document.path_count())
}
