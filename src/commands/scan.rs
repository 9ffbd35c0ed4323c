//! `ecocycle scan`: capture, classify, then walk the chosen branch.
//!
//! Input and output are generic so the whole dialogue can be driven from
//! tests with a byte buffer.

use std::io::Write;

use anyhow::bail;
use chrono::Local;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{info, warn};

use ec_core::{
    i18n::{CreativeText, NoticeText, ScanText},
    scan::{
        ClassificationResult, ImageSource, ScanError, ScanNotice, ScanState, Tool, ToolPicker,
        WorkflowState,
    },
    AppSession, DisposalGuide, ReuseStepper,
};
use ec_infra::links::{placeholder_image_url, video_search_url};

use crate::bootstrap::AppRuntime;
use crate::cli::{Branch, ScanArgs};

const STEP_KEYS: &str = "[n]ext [p]rev [f]inish [s]peak [b]ack [q]uit > ";
const DISPOSAL_KEYS: &str = "[a]cknowledge [s]peak [b]ack [q]uit > ";

/// How a scan dialogue ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanOutcome {
    ProjectCompleted { name: String },
    DisposalAcknowledged,
    Abandoned,
}

enum Decision {
    Creative,
    Disposal,
    Quit,
}

enum BranchExit {
    Done(ScanOutcome),
    BackToDecision,
    Quit,
}

pub struct ScanCommand<'a, R, W> {
    runtime: &'a AppRuntime,
    session: &'a mut AppSession,
    input: R,
    out: W,
}

impl<'a, R, W> ScanCommand<'a, R, W>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    pub fn new(runtime: &'a AppRuntime, session: &'a mut AppSession, input: R, out: W) -> Self {
        Self {
            runtime,
            session,
            input,
            out,
        }
    }

    pub async fn run(mut self, args: ScanArgs) -> anyhow::Result<ScanOutcome> {
        let text = ScanText::for_language(self.runtime.language);
        writeln!(self.out, "== {} ==", text.title)?;

        let state = self
            .runtime
            .orchestrator
            .capture(ImageSource::File(args.image.clone()))
            .await?;
        let Some(result) = self.settle_classification(state).await? else {
            return self.quit().await;
        };

        let mut requested = args.branch;
        let mut preset_tools = args.tools;
        loop {
            self.show_classification(&result).await?;
            let decision = match requested.take() {
                Some(Branch::Creative) if result.is_hazardous() => {
                    writeln!(self.out, "{}", ScanError::CreativeBranchUnavailable)?;
                    self.ask_decision(&result).await?
                }
                Some(Branch::Creative) => Decision::Creative,
                Some(Branch::Disposal) => Decision::Disposal,
                None => self.ask_decision(&result).await?,
            };

            let exit = match decision {
                Decision::Creative => {
                    self.creative(std::mem::take(&mut preset_tools), args.project.clone())
                        .await?
                }
                Decision::Disposal => self.disposal(&result).await?,
                Decision::Quit => BranchExit::Quit,
            };
            match exit {
                BranchExit::Done(outcome) => {
                    self.runtime.speech.stop().await.ok();
                    return Ok(outcome);
                }
                BranchExit::BackToDecision => continue,
                BranchExit::Quit => return self.quit().await,
            }
        }
    }

    /// Waits out a failed classification, offering retry with the same image.
    async fn settle_classification(
        &mut self,
        mut state: ScanState,
    ) -> anyhow::Result<Option<ClassificationResult>> {
        loop {
            match state.kind() {
                WorkflowState::Classified => return Ok(state.result().cloned()),
                WorkflowState::Idle => {
                    let Some(notice) = state.notice() else {
                        bail!("scan ended without a classification");
                    };
                    self.print_notice(notice)?;
                    if !state.can_retry() || !self.confirm_retry().await? {
                        return Ok(None);
                    }
                    state = self.runtime.orchestrator.retry().await?;
                }
                other => bail!("unexpected scan state after capture: {other:?}"),
            }
        }
    }

    async fn show_classification(&mut self, result: &ClassificationResult) -> anyhow::Result<()> {
        let text = ScanText::for_language(self.runtime.language);
        writeln!(self.out)?;
        writeln!(self.out, "{}", text.headline(result.classification))?;
        writeln!(self.out, "  {}", result.material_name)?;
        writeln!(self.out, "  {}", result.reason)?;
        writeln!(self.out, "{} {}", text.fact, result.impact_message)?;
        for suggestion in &result.suggestions {
            writeln!(self.out, "  - {}: {}", suggestion.title, suggestion.description)?;
        }
        self.narrate(text.fact_narration(&result.impact_message)).await;
        Ok(())
    }

    async fn ask_decision(&mut self, result: &ClassificationResult) -> anyhow::Result<Decision> {
        let text = ScanText::for_language(self.runtime.language);
        let options = result.decision_options();
        writeln!(self.out, "{}", text.question)?;
        if options.creative {
            writeln!(self.out, "  [c] {}", text.creative)?;
        }
        writeln!(self.out, "  [d] {}", text.disposal)?;
        loop {
            let Some(answer) = self.read_line("> ").await? else {
                return Ok(Decision::Quit);
            };
            match answer.as_str() {
                "c" if options.creative => return Ok(Decision::Creative),
                "d" => return Ok(Decision::Disposal),
                "q" => return Ok(Decision::Quit),
                _ => {}
            }
        }
    }

    async fn creative(
        &mut self,
        preset_tools: Vec<Tool>,
        project: Option<String>,
    ) -> anyhow::Result<BranchExit> {
        let creative = CreativeText::for_language(self.runtime.language);
        let mut picker = ToolPicker::new();
        for tool in preset_tools {
            if !picker.is_selected(tool) {
                picker.toggle(tool);
            }
        }

        loop {
            let Some(selection) = picker.selection() else {
                writeln!(self.out, "{}", creative.tools)?;
                let names: Vec<&str> = Tool::ALL.iter().map(Tool::name).collect();
                writeln!(self.out, "  {}", names.join(", "))?;
                let Some(line) = self.read_line("> ").await? else {
                    return Ok(BranchExit::Quit);
                };
                for token in line.split(',').filter(|t| !t.trim().is_empty()) {
                    match token.parse::<Tool>() {
                        Ok(tool) if !picker.is_selected(tool) => picker.toggle(tool),
                        Ok(_) => {}
                        Err(err) => writeln!(self.out, "{err}")?,
                    }
                }
                if !picker.can_generate() {
                    writeln!(self.out, "{}", creative.select_tool)?;
                }
                continue;
            };

            writeln!(self.out, "{} ({})", creative.btn, selection.joined())?;
            let state = self
                .runtime
                .orchestrator
                .choose_creative(selection.iter(), project.clone())
                .await?;
            match state.kind() {
                WorkflowState::ShowingSteps => return self.walk_steps(state).await,
                WorkflowState::Classified => {
                    if let Some(notice) = state.notice() {
                        self.print_notice(notice)?;
                        if self.confirm_retry().await? {
                            continue;
                        }
                    }
                    return Ok(BranchExit::BackToDecision);
                }
                other => bail!("unexpected scan state after blueprint request: {other:?}"),
            }
        }
    }

    async fn walk_steps(&mut self, mut state: ScanState) -> anyhow::Result<BranchExit> {
        let creative = CreativeText::for_language(self.runtime.language);
        let mut narrated: Option<usize> = None;

        loop {
            let Some(stepper) = state.stepper().cloned() else {
                bail!("no blueprint to show in state {:?}", state.kind());
            };
            let step = stepper.current();
            if narrated != Some(stepper.index()) {
                if stepper.is_first() {
                    writeln!(self.out)?;
                    writeln!(self.out, "{}", stepper.instruction().project_name())?;
                }
                writeln!(
                    self.out,
                    "{}: {}",
                    creative.step_counter(stepper.index(), stepper.len()),
                    step.instruction
                )?;
                writeln!(self.out, "  {}", placeholder_image_url(&step.visual_prompt))?;
                self.narrate(step.instruction.clone()).await;
                narrated = Some(stepper.index());
            }

            let Some(key) = self.read_line(STEP_KEYS).await? else {
                return Ok(BranchExit::Quit);
            };
            let runtime = self.runtime;
            let orchestrator = &runtime.orchestrator;
            match key.as_str() {
                "n" => state = orchestrator.next_step().await?,
                "p" => state = orchestrator.prev_step().await?,
                "f" => match orchestrator.finish_project().await {
                    Ok(_) => return self.complete_project(&stepper),
                    Err(err @ ScanError::StepsRemaining { .. }) => writeln!(self.out, "{err}")?,
                    Err(err) => return Err(err.into()),
                },
                "s" => self.toggle_speech(step.instruction.clone()).await,
                "b" => {
                    orchestrator.back_to_decision().await?;
                    self.runtime.speech.stop().await.ok();
                    return Ok(BranchExit::BackToDecision);
                }
                "q" => return Ok(BranchExit::Quit),
                _ => {}
            }
        }
    }

    fn complete_project(&mut self, stepper: &ReuseStepper) -> anyhow::Result<BranchExit> {
        let creative = CreativeText::for_language(self.runtime.language);
        let instruction = stepper.instruction();
        let cover = instruction
            .steps()
            .first()
            .map(|s| placeholder_image_url(&s.visual_prompt))
            .unwrap_or_default();
        let project = self.session.record_completed_project(
            instruction.project_name(),
            cover,
            Local::now().date_naive(),
        );
        info!(project = %project.name, "reuse project completed");
        let name = project.name.clone();

        writeln!(self.out, "{}", creative.completed)?;
        match video_search_url(instruction.search_query()) {
            Ok(url) => writeln!(self.out, "{}: {url}", creative.videos)?,
            Err(err) => warn!(error = %err, "could not build video search link"),
        }
        Ok(BranchExit::Done(ScanOutcome::ProjectCompleted { name }))
    }

    async fn disposal(&mut self, result: &ClassificationResult) -> anyhow::Result<BranchExit> {
        self.runtime.orchestrator.choose_disposal().await?;
        let guide = DisposalGuide::new(result, self.runtime.language);

        writeln!(self.out)?;
        writeln!(self.out, "{} ({})", guide.title, guide.material_name)?;
        for step in &guide.steps {
            writeln!(self.out, "  {}. {}", step.number, step.text)?;
        }
        writeln!(self.out, "! {}", guide.warning)?;
        writeln!(self.out, "{}", guide.impact)?;
        self.narrate(guide.narration()).await;

        loop {
            let Some(key) = self.read_line(DISPOSAL_KEYS).await? else {
                return Ok(BranchExit::Quit);
            };
            match key.as_str() {
                "a" => {
                    self.runtime.orchestrator.acknowledge_disposal().await?;
                    writeln!(self.out, "{}", guide.acknowledge)?;
                    return Ok(BranchExit::Done(ScanOutcome::DisposalAcknowledged));
                }
                "s" => self.toggle_speech(guide.narration()).await,
                "b" => {
                    self.runtime.orchestrator.back_to_decision().await?;
                    self.runtime.speech.stop().await.ok();
                    return Ok(BranchExit::BackToDecision);
                }
                "q" => return Ok(BranchExit::Quit),
                _ => {}
            }
        }
    }

    async fn quit(&mut self) -> anyhow::Result<ScanOutcome> {
        self.runtime.orchestrator.cancel().await?;
        self.runtime.speech.stop().await.ok();
        Ok(ScanOutcome::Abandoned)
    }

    fn print_notice(&mut self, notice: ScanNotice) -> anyhow::Result<()> {
        let text = NoticeText::for_language(self.runtime.language);
        writeln!(self.out, "! {}", text.message(notice))?;
        Ok(())
    }

    async fn confirm_retry(&mut self) -> anyhow::Result<bool> {
        let text = NoticeText::for_language(self.runtime.language);
        let prompt = format!("{} [y/N] > ", text.retry);
        Ok(matches!(
            self.read_line(&prompt).await?.as_deref(),
            Some("y" | "yes")
        ))
    }

    /// Speech failures never interrupt the dialogue.
    async fn narrate(&self, text: String) {
        if let Err(err) = self.runtime.speech.speak(text, self.runtime.language).await {
            warn!(error = %err, "narration unavailable");
        }
    }

    async fn toggle_speech(&self, text: String) {
        if let Err(err) = self.runtime.speech.toggle(text, self.runtime.language).await {
            warn!(error = %err, "narration unavailable");
        }
    }

    /// Reads one trimmed, lower-cased answer. `None` on end of input.
    async fn read_line(&mut self, prompt: &str) -> anyhow::Result<Option<String>> {
        write!(self.out, "{prompt}")?;
        self.out.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line).await? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_lowercase()))
    }
}
