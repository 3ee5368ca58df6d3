use crate::infra::{load_questionnaire, parse_answer};
use clap::Args;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use seller_profile::config::AppConfig;
use seller_profile::error::AppError;
use seller_profile::questionnaire::{AnswerId, QuestionId};
use seller_profile::responses::{score_all, ResponseImport};
use seller_profile::session::{QuizSession, QuizStep, SessionOptions};
use seller_profile::share::{share_text, share_url};
use seller_profile::tracking::{LogTrackSink, TelegramUser, TrackRequest, TrackSink};
use seller_profile::{compute_profile, AnswerSelection, Profile, ProfileEntry, Questionnaire};
use std::fmt::Write;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Chosen answer as QUESTION=ANSWER (repeatable)
    #[arg(long = "answer", value_parser = parse_answer)]
    answers: Vec<(QuestionId, AnswerId)>,
    /// Questionnaire JSON to score against (defaults to the configured one)
    #[arg(long)]
    questionnaire: Option<PathBuf>,
    /// Print the profile as JSON instead of a report
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct BatchArgs {
    /// CSV with `respondent,question_id,answer_id` columns
    #[arg(long)]
    responses: PathBuf,
    /// Questionnaire JSON to score against (defaults to the configured one)
    #[arg(long)]
    questionnaire: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Seed for the simulated answers and feedback messages
    #[arg(long, default_value_t = 7)]
    seed: u64,
    /// Questionnaire JSON to walk through (defaults to the configured one)
    #[arg(long)]
    questionnaire: Option<PathBuf>,
    /// Telegram user id to attach to the simulated tracking events
    #[arg(long, default_value_t = 1)]
    user_id: i64,
}

fn questionnaire_for(
    override_path: Option<PathBuf>,
    config: &AppConfig,
) -> Result<Questionnaire, AppError> {
    let path = override_path.or_else(|| config.questionnaire.path.clone());
    Ok(load_questionnaire(path.as_deref())?)
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let ScoreArgs {
        answers,
        questionnaire,
        json,
    } = args;

    let config = AppConfig::load()?;
    let questionnaire = questionnaire_for(questionnaire, &config)?;
    let selections: AnswerSelection = answers.into_iter().collect();
    let profile = compute_profile(&questionnaire, &selections);

    if json {
        let rendered =
            serde_json::to_string_pretty(&profile).map_err(std::io::Error::from)?;
        println!("{rendered}");
    } else {
        print!("{}", render_profile(&questionnaire, &profile));
        println!(
            "\n{}",
            share_text(&questionnaire, &profile, &config.share.bot_handle)
        );
    }

    Ok(())
}

pub(crate) fn run_batch(args: BatchArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let questionnaire = questionnaire_for(args.questionnaire, &config)?;
    let responses = ResponseImport::from_path(&args.responses)?;

    println!("respondent,primary,primary_pct,secondary,secondary_pct");
    for scored in score_all(&questionnaire, &responses) {
        let (primary, primary_pct) = entry_columns(scored.profile.primary.as_ref());
        let (secondary, secondary_pct) = entry_columns(scored.profile.secondary.as_ref());
        println!(
            "{},{},{},{},{}",
            scored.respondent, primary, primary_pct, secondary, secondary_pct
        );
    }

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let questionnaire = questionnaire_for(args.questionnaire, &config)?;
    let mut rng = StdRng::seed_from_u64(args.seed);
    let sink = LogTrackSink;
    let user = TelegramUser {
        id: args.user_id,
        username: Some("demo_seller".to_string()),
    };

    let mut session = QuizSession::new(
        &questionnaire,
        SessionOptions {
            show_intro: true,
            auto_advance: Some(config.session.auto_advance),
        },
    );
    let mut now = Instant::now();

    println!("Seller profile demo (seed {})", args.seed);
    println!(
        "{} questions, {} types",
        questionnaire.questions.len(),
        questionnaire.types.len()
    );

    if session.marks_mut().claim_open() {
        record(&sink, TrackRequest::open(&user));
    }
    session.start();

    while let QuizStep::Question(index) = session.step() {
        let question = &questionnaire.questions[index];
        if question.answers.is_empty() {
            println!("\n{}. {} (no answers, skipped)", index + 1, question.text);
            break;
        }
        let key = rng.gen_range(1..=question.answers.len());
        let answer = session.select_by_key(&questionnaire, key, now)?;

        println!("\n{}. {}", index + 1, question.text);
        println!("   -> {}", answer.text);
        if let Some(message) = questionnaire.micro_feedback_for(answer, &mut rng) {
            println!("   {message}");
        }

        now += config.session.auto_advance;
        if !session.poll(now) && !session.next(&questionnaire) {
            break;
        }
    }

    let profile = session.profile(&questionnaire);
    println!("\n{}", render_profile(&questionnaire, &profile));

    let text = share_text(&questionnaire, &profile, &config.share.bot_handle);
    println!("\nShare card\n{text}");
    println!("\nShare link: {}", share_url(&config.share.origin, &text));

    if session.claim_finish_event() && session.marks_mut().claim_notification(user.id) {
        record(
            &sink,
            TrackRequest::finish(&user, &profile, chrono::Utc::now()),
        );
    }

    Ok(())
}

// tracking failures are logged and dropped
fn record(sink: &impl TrackSink, request: TrackRequest) {
    match request.validate(None, chrono::Utc::now()) {
        Ok(record) => {
            if let Err(err) = sink.record(record) {
                tracing::warn!(error = %err, "track event dropped");
            }
        }
        Err(err) => tracing::warn!(error = %err, "track event rejected"),
    }
}

fn render_profile(questionnaire: &Questionnaire, profile: &Profile) -> String {
    let mut out = String::new();

    match &profile.primary {
        Some(primary) => {
            let _ = writeln!(
                out,
                "Primary: {} ({}, {}%)",
                questionnaire.type_name(&primary.key),
                primary.score,
                primary.percentage
            );
            if let Some(definition) = questionnaire.type_definition(&primary.key) {
                if let Some(disc) = &definition.disc {
                    let _ = writeln!(out, "DISC: {} - {}", disc.code, disc.label);
                }
                if let Some(jung) = &definition.jung {
                    let _ = writeln!(out, "Jung: {}", jung.label);
                }
                if let Some(archetype) = &definition.archetype {
                    let _ = writeln!(out, "Archetype: {archetype}");
                }
                write_list(&mut out, "Strengths", &definition.result.strengths);
                write_list(&mut out, "Traps", &definition.result.traps);
                write_list(&mut out, "Growth plan", &definition.result.growth);
            }
        }
        None => out.push_str("Primary: not determined\n"),
    }

    match &profile.secondary {
        Some(secondary) => {
            let _ = writeln!(
                out,
                "Secondary: {} ({}%)",
                questionnaire.type_name(&secondary.key),
                secondary.percentage
            );
            let mix = profile
                .primary
                .as_ref()
                .and_then(|primary| questionnaire.type_definition(&primary.key))
                .and_then(|definition| definition.result.secondary_mix.get(&secondary.key));
            if let Some(mix) = mix {
                let _ = writeln!(out, "  adds: {}", mix.adds);
                let _ = writeln!(out, "  risk: {}", mix.risk);
            }
        }
        None => out.push_str("Secondary: none\n"),
    }

    out.push_str("\nScores\n");
    for ranked in &profile.ranking {
        let _ = writeln!(
            out,
            "- {}: {}",
            questionnaire.type_name(&ranked.key),
            ranked.score
        );
    }

    out
}

fn write_list(out: &mut String, title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    let _ = writeln!(out, "{title}:");
    for item in items {
        let _ = writeln!(out, "  - {item}");
    }
}

fn entry_columns(entry: Option<&ProfileEntry>) -> (String, String) {
    match entry {
        Some(entry) => (entry.key.to_string(), entry.percentage.to_string()),
        None => (String::new(), String::new()),
    }
}
