//! Siege commands: question catalog management

use colored::Colorize;

use prospec_client::questions::CreateQuestion;
use prospec_client::QuestionService;
use prospec_core::{Question, QuestionType, View};

use super::Context;

fn print_questions(questions: &[Question]) {
    for question in questions {
        let state = if question.active { "actif" } else { "inactif" };
        let required = if question.required { " *" } else { "" };
        println!(
            "{:>4}  [{}] {:<20} {}{}",
            question.id,
            state,
            question.question_type.display_name(),
            question.text,
            required
        );
        for option in question.ordered_options() {
            println!("        - {}", option.value);
        }
    }
}

pub async fn dashboard(ctx: &Context) -> Result<(), String> {
    if !ctx.enter(View::QuestionManagement)? {
        return Ok(());
    }
    let dashboard = QuestionService::new(&ctx.gateway)
        .load_dashboard()
        .await
        .map_err(|e| e.to_string())?;

    println!("{}", "Questions".bold());
    print_questions(&dashboard.questions);
    println!();
    println!("{}", "Types disponibles".bold());
    for info in dashboard.types.values() {
        let options = if info.requires_options { " (avec options)" } else { "" };
        println!("  {:<16} {}{}", info.name, info.description, options);
    }
    println!();
    println!("{}", "Aperçu agent".bold());
    print_questions(&dashboard.preview);
    println!();
    println!(
        "{} question(s), {} active(s)",
        dashboard.stats.total_questions, dashboard.stats.questions_actives
    );
    Ok(())
}

pub async fn list(ctx: &Context) -> Result<(), String> {
    if !ctx.enter(View::QuestionManagement)? {
        return Ok(());
    }
    let questions = QuestionService::new(&ctx.gateway)
        .admin_questions()
        .await
        .map_err(|e| e.to_string())?;
    if ctx.format.is_json() {
        ctx.format.print_json(&questions);
        return Ok(());
    }
    print_questions(&questions);
    Ok(())
}

pub async fn preview(ctx: &Context) -> Result<(), String> {
    if !ctx.enter(View::QuestionManagement)? {
        return Ok(());
    }
    let questions = QuestionService::new(&ctx.gateway)
        .form_preview()
        .await
        .map_err(|e| e.to_string())?;
    print_questions(&questions);
    Ok(())
}

pub async fn stats(ctx: &Context) -> Result<(), String> {
    if !ctx.enter(View::QuestionManagement)? {
        return Ok(());
    }
    let stats = QuestionService::new(&ctx.gateway)
        .stats()
        .await
        .map_err(|e| e.to_string())?;
    println!("Total: {}", stats.total_questions);
    println!("Actives: {}", stats.questions_actives);
    for (type_name, count) in &stats.repartition_types {
        println!("  {type_name:<20} {count}");
    }
    Ok(())
}

pub async fn create(
    ctx: &Context,
    text: &str,
    description: &str,
    type_name: &str,
    required: bool,
    options: Vec<String>,
) -> Result<(), String> {
    if !ctx.enter(View::QuestionManagement)? {
        return Ok(());
    }
    let question_type: QuestionType =
        serde_json::from_value(serde_json::Value::String(type_name.to_string()))
            .map_err(|_| format!("Type de question inconnu: {type_name}"))?;

    let message = QuestionService::new(&ctx.gateway)
        .create(&CreateQuestion {
            text: text.to_string(),
            description: description.to_string(),
            question_type,
            required,
            options,
        })
        .await
        .map_err(|e| e.to_string())?;
    println!("{}", message.green());
    Ok(())
}

pub async fn reorder(ctx: &Context, ids: &[u64]) -> Result<(), String> {
    if !ctx.enter(View::QuestionManagement)? {
        return Ok(());
    }
    let message = QuestionService::new(&ctx.gateway)
        .reorder(ids)
        .await
        .map_err(|e| e.to_string())?;
    println!("{message}");
    Ok(())
}

pub async fn set_active(ctx: &Context, id: u64, active: bool) -> Result<(), String> {
    if !ctx.enter(View::QuestionManagement)? {
        return Ok(());
    }
    let message = QuestionService::new(&ctx.gateway)
        .set_active(id, active)
        .await
        .map_err(|e| e.to_string())?;
    println!("{message}");
    Ok(())
}
