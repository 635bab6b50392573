use crate::infra::{parse_answer, InMemoryAnswerStore};
use clap::Args;
use investor_type::config::AppConfig;
use investor_type::error::AppError;
use investor_type::quiz::{
    AnswerSet, AnswerSheetImporter, AnswerValue, Axis, DescriptionBlock, InvestorCode,
    QuestionCatalog, QuizService, ScoreState, ScoringEngine, TypeCatalog, TypeDetailView,
};
use std::path::PathBuf;
use std::sync::Arc;

/// Scripted answers used by `demo` when no uniform value is given.
const DEMO_ANSWERS: [u8; 16] = [4, 2, 5, 2, 2, 4, 1, 5, 3, 3, 4, 2, 5, 1, 2, 4];

#[derive(Args, Debug, Default)]
pub(crate) struct ScoreArgs {
    /// Answer as QUESTION_ID=VALUE (1-5, out-of-range values are clamped). Repeatable.
    #[arg(long = "answer", value_parser = parse_answer)]
    pub(crate) answers: Vec<(u32, i64)>,
    /// CSV answer sheet with respondent,question_id,value columns
    #[arg(long)]
    pub(crate) csv: Option<PathBuf>,
    /// Print per-letter totals next to each result
    #[arg(long)]
    pub(crate) explain: bool,
}

#[derive(Args, Debug)]
pub(crate) struct TypeShowArgs {
    /// Four-letter investor code, case-insensitive
    #[arg(value_parser = parse_code)]
    pub(crate) code: InvestorCode,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Answer every question with this value instead of the scripted profile
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=5))]
    pub(crate) uniform: Option<u8>,
    /// Print the full description of the resulting type
    #[arg(long)]
    pub(crate) full: bool,
}

fn parse_code(raw: &str) -> Result<InvestorCode, String> {
    InvestorCode::parse(raw).map_err(|err| err.to_string())
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let ScoreArgs {
        answers,
        csv,
        explain,
    } = args;

    let engine = ScoringEngine::standard();
    let questions = engine.questions();

    if !answers.is_empty() || csv.is_none() {
        let answers = AnswerSet::from_raw(answers);
        if answers.is_empty() {
            println!("No answers given; every question is treated as neutral.");
        }
        render_score_line("command line", &engine, &answers, explain);
    }

    if let Some(path) = csv {
        let sheets = AnswerSheetImporter::from_path(&path)?;
        println!(
            "Answer sheet {} ({} respondents, {} questions each)",
            path.display(),
            sheets.len(),
            questions.len()
        );
        for sheet in &sheets {
            render_score_line(&sheet.respondent, &engine, &sheet.answers, explain);
        }
    }

    Ok(())
}

pub(crate) fn run_types_list() -> Result<(), AppError> {
    let catalog = TypeCatalog::standard();
    println!("Investor types ({})", catalog.len());
    for record in catalog.records() {
        println!(
            "- {} {:<12} {}",
            record.code, record.name, record.short_label
        );
    }
    Ok(())
}

pub(crate) fn run_types_show(args: TypeShowArgs) -> Result<(), AppError> {
    let catalog = TypeCatalog::standard();
    match catalog.get(args.code) {
        Some(record) => render_type_detail(&TypeDetailView::new(&catalog, record), true),
        None => println!("No catalog record for {}", args.code),
    }
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs { uniform, full } = args;
    let config = AppConfig::load()?;

    let idle = chrono::Duration::minutes(config.quiz.session_idle_minutes);
    let store = Arc::new(InMemoryAnswerStore::new(idle));
    let service = QuizService::new(store, config.quiz.public_url.clone());

    println!("Investor type quiz demo");
    let mut progress = match service.start(None, false) {
        Ok(progress) => progress,
        Err(err) => {
            println!("  Session could not start: {}", err);
            return Ok(());
        }
    };
    println!("Session {}", progress.session_id);

    let questions = QuestionCatalog::standard();
    for (index, question) in questions.questions().iter().enumerate() {
        let raw = uniform.unwrap_or(DEMO_ANSWERS[index % DEMO_ANSWERS.len()]);
        let value = AnswerValue::clamped(i64::from(raw));
        println!(
            "[{:>2}/{}] {} -> {}",
            index + 1,
            questions.len(),
            question.text,
            value
        );
        progress = match service.answer(&progress.session_id, question.id, value) {
            Ok(progress) => progress,
            Err(err) => {
                println!("  Answer rejected: {}", err);
                return Ok(());
            }
        };
    }
    println!("Progress: {}% ({}/{})", progress.percent, progress.answered, progress.total);

    let totals = service.engine().score(&progress.answers);
    let outcome = match service.complete(&progress.session_id) {
        Ok(outcome) => outcome,
        Err(err) => {
            println!("  Quiz could not be completed: {}", err);
            return Ok(());
        }
    };

    println!();
    render_scores(&totals);
    let view = service.result_view(outcome.record);
    render_type_detail(&view.result, full);
    println!("\nShare");
    println!("  {}", view.share.text);
    println!("  {}", view.share.url);
    println!("  {}", view.share.intent_url);

    Ok(())
}

fn render_score_line(label: &str, engine: &ScoringEngine<'_>, answers: &AnswerSet, explain: bool) {
    let questions = engine.questions();
    let code = engine.compute_code(answers);
    let name = engine
        .types()
        .get(code)
        .map(|record| record.name)
        .unwrap_or("(unknown)");

    println!(
        "{}: {} {} ({}/{} answered)",
        label,
        code,
        name,
        answers.answered_in(&questions),
        questions.len()
    );
    if explain {
        render_scores(&engine.score(answers));
    }
}

fn render_scores(state: &ScoreState) {
    println!("Axis totals");
    for axis in Axis::ALL {
        let (first, second) = axis.letters();
        let score = state.axis(axis);
        println!(
            "  {:<10} {} {:>6.2} | {} {:>6.2} -> {}",
            axis.label(),
            first,
            score.first,
            second,
            score.second,
            axis.letter(score.winner())
        );
    }
}

fn render_type_detail(detail: &TypeDetailView, full: bool) {
    let summary = &detail.summary;
    println!("{} {}", summary.code, summary.name);
    println!("{}", summary.short_label);
    if let Some(path) = &summary.image_path {
        println!("Illustration: {}", path);
    }

    println!("\nLetters");
    for meaning in &detail.letters {
        println!(
            "  {} {} ({}): {}",
            meaning.letter, meaning.name, meaning.axis_label, meaning.description
        );
    }

    if full {
        for block in &detail.sections {
            match block {
                DescriptionBlock::Heading(text) => println!("\n{}", text),
                DescriptionBlock::Paragraph(text) => println!("  {}", text),
            }
        }
    }

    if let Some(strategy) = detail.ideal_strategy {
        println!("\nIdeal strategy: {}", strategy);
    }

    let compatibility = &detail.compatibility;
    for (label, entries) in [
        ("Best matches", &compatibility.best),
        ("Good matches", &compatibility.good),
        ("Challenging matches", &compatibility.challenge),
    ] {
        if entries.is_empty() {
            continue;
        }
        println!("\n{}", label);
        for entry in entries {
            println!("- {} {}", entry.code, entry.name);
        }
    }

    if let Some(cta) = detail.cta_message {
        println!("\n{}", cta);
    }
}
