// Interactive terminal session: renders the current workflow stage, reads one
// command per line and feeds it through the reducer.

use anyhow::Result;
use std::io::{BufRead, Write};
use std::path::PathBuf;

use tracing::Instrument;

use super::read_json;
use crate::config::ScenarioBuilderConfig;
use crate::fs::{FileSystemOperations, StandardFileSystem};
use crate::github::{connect, GitHubPublisher, RemoteCredential, ScenarioPublisher};
use crate::output::{default_filename_now, download, normalize_filename, serialize};
use crate::scenario::{ScenarioDocument, ScenarioField, ScenarioRecord, VitalSign};
use crate::telemetry::{create_session_span, generate_session_id};
use crate::workflows::{reduce, Stage, WorkflowAction, WorkflowState};

/// Where an interactive session starts
pub enum SessionStart {
    Blank,
    Sample,
    Document(PathBuf),
}

/// `new` / `review`: run a session on the terminal
pub struct SessionCommand {
    pub start: SessionStart,
    config: ScenarioBuilderConfig,
}

impl SessionCommand {
    pub fn new(start: SessionStart, config: ScenarioBuilderConfig) -> Self {
        Self { start, config }
    }

    fn initial_state(&self) -> Result<WorkflowState> {
        let state = match &self.start {
            SessionStart::Blank => WorkflowState::new(),
            SessionStart::Sample => reduce(WorkflowState::new(), WorkflowAction::LoadSample),
            SessionStart::Document(path) => {
                let document: ScenarioDocument = read_json(path)?;
                WorkflowState::from_document(&document)
            }
        };
        Ok(state)
    }

    pub async fn execute(&self) -> Result<()> {
        let state = self.initial_state()?;
        let publisher = GitHubPublisher::new(self.config.github.api_base_url.clone());
        let fs_ops = StandardFileSystem;

        let session_id = generate_session_id();
        let span = create_session_span(&session_id, &state.stage().to_string());

        async {
            // A fully configured token is connected up front; otherwise use `connect`.
            let configured = self.config.github.credential(None, None);
            let credential = if configured.is_complete() {
                connect(&publisher, configured).await.ok()
            } else {
                None
            };

            let stdin = std::io::stdin();
            let mut session = Session::new(
                state,
                &publisher,
                &fs_ops,
                self.config.output.directory.clone(),
                stdin.lock(),
                std::io::stdout(),
            )
            .with_credential(credential);
            session.run().await
        }
        .instrument(span)
        .await
    }
}

enum Flow {
    Continue,
    Quit,
}

pub struct Session<'a, R, W> {
    state: WorkflowState,
    filename: String,
    credential: Option<RemoteCredential>,
    publisher: &'a dyn ScenarioPublisher,
    fs_ops: &'a dyn FileSystemOperations,
    output_dir: PathBuf,
    input: R,
    out: W,
}

impl<'a, R: BufRead, W: Write> Session<'a, R, W> {
    pub fn new(
        state: WorkflowState,
        publisher: &'a dyn ScenarioPublisher,
        fs_ops: &'a dyn FileSystemOperations,
        output_dir: PathBuf,
        input: R,
        out: W,
    ) -> Self {
        let filename = default_filename_now();
        Self {
            state,
            filename,
            credential: None,
            publisher,
            fs_ops,
            output_dir,
            input,
            out,
        }
    }

    /// Pre-connect a credential (e.g. one validated from configuration)
    pub fn with_credential(mut self, credential: Option<RemoteCredential>) -> Self {
        self.credential = credential;
        self
    }

    pub fn state(&self) -> &WorkflowState {
        &self.state
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Run until `quit` or end of input
    pub async fn run(&mut self) -> Result<()> {
        loop {
            self.render()?;
            let Some(line) = self.prompt("> ")? else {
                break;
            };
            if let Flow::Quit = self.dispatch(line.trim()).await? {
                break;
            }
        }
        writeln!(self.out, "👋 Session closed")?;
        Ok(())
    }

    fn apply(&mut self, action: WorkflowAction) {
        let previous = self.state.stage();
        let state = std::mem::take(&mut self.state);
        self.state = reduce(state, action);

        if previous != Stage::Result && self.state.stage() == Stage::Result {
            self.filename = default_filename_now();
        }
    }

    async fn dispatch(&mut self, command: &str) -> Result<Flow> {
        if matches!(command, "quit" | "q" | "exit") {
            return Ok(Flow::Quit);
        }

        match self.state.stage() {
            Stage::Editing => self.dispatch_editing(command)?,
            Stage::Reviewing => self.dispatch_reviewing(command)?,
            Stage::Result => self.dispatch_result(command).await?,
        }
        Ok(Flow::Continue)
    }

    fn dispatch_editing(&mut self, command: &str) -> Result<()> {
        match command {
            "sample" => self.apply(WorkflowAction::LoadSample),
            "clear" => self.apply(WorkflowAction::Reset),
            "review" => self.apply(WorkflowAction::Review),
            "" => {}
            other => match other.parse::<usize>() {
                Ok(n) if (1..=ScenarioField::ALL.len()).contains(&n) => {
                    let field = ScenarioField::ALL[n - 1];
                    let label = match field.vital() {
                        Some(sign) => format!("{} ({})", field.label(), sign.unit_label()),
                        None => field.label().to_string(),
                    };
                    if let Some(value) = self.prompt(&format!("{label}: "))? {
                        self.apply(WorkflowAction::SetField { field, value });
                    }
                }
                _ => writeln!(self.out, "❓ Unknown command: {other}")?,
            },
        }
        Ok(())
    }

    fn dispatch_reviewing(&mut self, command: &str) -> Result<()> {
        match command {
            "edit" => self.apply(WorkflowAction::Edit),
            "generate" => self.apply(WorkflowAction::Generate),
            "clear" => self.apply(WorkflowAction::Reset),
            "" => {}
            other => writeln!(self.out, "❓ Unknown command: {other}")?,
        }
        Ok(())
    }

    async fn dispatch_result(&mut self, command: &str) -> Result<()> {
        let (verb, argument) = match command.split_once(' ') {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (command, ""),
        };

        match verb {
            "name" => self.filename = argument.to_string(),
            "download" => self.download().await?,
            "connect" => self.connect().await?,
            "disconnect" => {
                self.credential = None;
                writeln!(self.out, "🔌 Disconnected from GitHub")?;
            }
            "publish" => self.publish().await?,
            "back" => self.apply(WorkflowAction::BackToReview),
            "new" => self.apply(WorkflowAction::Reset),
            "" => {}
            other => writeln!(self.out, "❓ Unknown command: {other}")?,
        }
        Ok(())
    }

    async fn download(&mut self) -> Result<()> {
        let Some(document) = self.state.document() else {
            return Ok(());
        };
        let text = serialize(document)?;
        // A failed write is reported and the document stays on screen for another try.
        match download(self.fs_ops, &self.output_dir, &text, &self.filename).await {
            Ok(path) => writeln!(self.out, "💾 Saved {}", path.display())?,
            Err(e) => {
                tracing::warn!(error = %e, "Download failed");
                writeln!(self.out, "❌ {e}")?;
                writeln!(self.out, "   → Choose another name: name <file>")?;
            }
        }
        Ok(())
    }

    async fn connect(&mut self) -> Result<()> {
        let token = self.prompt("Personal Access Token: ")?.unwrap_or_default();
        let owner = self.prompt("Owner (User/Org): ")?.unwrap_or_default();
        let repo = self.prompt("Repository Name: ")?.unwrap_or_default();

        writeln!(self.out, "🔄 Validating token...")?;
        match connect(self.publisher, RemoteCredential::new(token, owner, repo)).await {
            Ok(credential) => {
                writeln!(self.out, "✅ Connected to GitHub {}", credential.repository())?;
                self.credential = Some(credential);
            }
            Err(e) => writeln!(self.out, "❌ {e}")?,
        }
        Ok(())
    }

    async fn publish(&mut self) -> Result<()> {
        let (Some(credential), Some(document)) = (&self.credential, self.state.document()) else {
            writeln!(self.out, "⚠️  Connect a GitHub repository first: connect")?;
            return Ok(());
        };

        let filename = normalize_filename(&self.filename);
        writeln!(self.out, "🔄 Publishing {filename}...")?;
        match self.publisher.publish(credential, &filename, document).await {
            Ok(url) => writeln!(self.out, "✅ Published: {url}")?,
            Err(e) => {
                writeln!(self.out, "❌ {e}")?;
                for hint in e.remediation() {
                    writeln!(self.out, "   → {hint}")?;
                }
            }
        }
        Ok(())
    }

    fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        write!(self.out, "{label}")?;
        self.out.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn render(&mut self) -> Result<()> {
        writeln!(self.out)?;
        match &self.state {
            WorkflowState::Editing { record, errors } => {
                // Errors come first so they are the first thing seen after a failed review.
                if !errors.is_empty() {
                    writeln!(self.out, "❗ {errors}")?;
                }
                render_form(&mut self.out, record)?;
            }
            WorkflowState::Reviewing { record } => render_review(&mut self.out, record)?,
            WorkflowState::Result { document } => {
                render_result(&mut self.out, document, &self.filename, self.credential.as_ref())?
            }
        }
        Ok(())
    }
}

fn render_form(out: &mut impl Write, record: &ScenarioRecord) -> Result<()> {
    writeln!(out, "📝 1. Clinical Scenario Details")?;
    writeln!(out, "──────────────────────────────")?;
    for (index, field) in ScenarioField::ALL.iter().enumerate() {
        let unit = field
            .vital()
            .map(|sign| format!(" [{}]", sign.unit_label()))
            .unwrap_or_default();
        let marker = if field.required_message().is_some() { "*" } else { " " };
        writeln!(
            out,
            "{:>3}.{marker} {}{unit}: {}",
            index + 1,
            field.label(),
            record.get(*field)
        )?;
    }
    writeln!(out)?;
    writeln!(out, "Commands: <number> edit field · sample · clear · review · quit")?;
    Ok(())
}

fn review_value(value: &str) -> &str {
    if value.is_empty() {
        "Not specified"
    } else {
        value
    }
}

fn with_unit(record: &ScenarioRecord, sign: VitalSign) -> String {
    let value = record.get(ScenarioField::Vital(sign));
    if value.is_empty() {
        String::new()
    } else {
        format!("{value}{}", sign.unit_suffix())
    }
}

fn render_review(out: &mut impl Write, record: &ScenarioRecord) -> Result<()> {
    writeln!(out, "🔍 Confirm Scenario Details")?;
    writeln!(out, "──────────────────────────")?;

    writeln!(out, "1 Scenario Overview")?;
    writeln!(out, "   Scenario Name: {}", review_value(&record.scenario_name))?;

    writeln!(out, "2 Present Illness & Vitals")?;
    writeln!(
        out,
        "   Reason for Presentation: {}",
        review_value(record.get(ScenarioField::ReasonForPresentation))
    )?;
    for (label, sign) in [
        ("Heart Rate", VitalSign::HeartRate),
        ("BP", VitalSign::BloodPressure),
        ("O2 Sat", VitalSign::OxygenSaturation),
        ("Temp", VitalSign::Temperature),
    ] {
        writeln!(out, "   {label}: {}", review_value(&with_unit(record, sign)))?;
    }

    writeln!(out, "3 History & Labs")?;
    for (label, field) in [
        ("Past History", ScenarioField::PastMedicalHistory),
        ("Allergies", ScenarioField::Allergies),
        ("Medications", ScenarioField::Medications),
        ("Labs", ScenarioField::Labs),
        ("Imagings", ScenarioField::Imagings),
    ] {
        writeln!(out, "   {label}: {}", review_value(record.get(field)))?;
    }

    writeln!(out, "4 Interventions")?;
    writeln!(
        out,
        "   Has Been Done: {}",
        review_value(record.get(ScenarioField::WhatHasBeenDone))
    )?;
    writeln!(
        out,
        "   Needs To Be Done: {}",
        review_value(record.get(ScenarioField::WhatNeedsToBeDone))
    )?;

    writeln!(out)?;
    writeln!(out, "Commands: edit · generate · clear · quit")?;
    Ok(())
}

fn render_result(
    out: &mut impl Write,
    document: &ScenarioDocument,
    filename: &str,
    credential: Option<&RemoteCredential>,
) -> Result<()> {
    writeln!(out, "📦 2. Result")?;
    writeln!(out, "────────────")?;
    writeln!(out, "{}", serialize(document)?)?;
    writeln!(out)?;
    writeln!(out, "File name: {filename} (.json)")?;
    match credential {
        Some(credential) => {
            writeln!(out, "🐙 Connected to GitHub {}", credential.repository())?;
            writeln!(
                out,
                "Commands: name <file> · download · publish · disconnect · back · new · quit"
            )?;
        }
        None => writeln!(
            out,
            "Commands: name <file> · download · connect · back · new · quit"
        )?,
    }
    Ok(())
}
