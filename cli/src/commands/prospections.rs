//! Agent commands: intake form, submission, list, details, statistics

use std::io::Write;

use colored::Colorize;

use prospec_client::{format_date, format_phone, GatewayError, ProspectionService};
use prospec_core::{validation, AnswerSet, Control, View};

use super::Context;

pub async fn form(ctx: &Context) -> Result<(), String> {
    if !ctx.enter(View::AgentIntake)? {
        return Ok(());
    }
    let form = ProspectionService::new(&ctx.gateway)
        .form()
        .await
        .map_err(|e| e.to_string())?;

    if ctx.format.is_json() {
        ctx.format.print_json(&form);
        return Ok(());
    }

    println!("{}", "Types de prospection".bold());
    for t in &form.types_prospection {
        println!("  {}  {} — {}", t.value, t.label, t.description);
    }
    println!();
    println!("{}", "Questions".bold());
    for question in form.ordered_questions() {
        let required = if question.required { " *" } else { "" };
        println!("{:>4}. {}{}", question.id, question.text, required.red());
        if let Some(description) = &question.description {
            println!("      {description}");
        }
        match Control::for_question(question) {
            Control::Select { options } => {
                println!("      choix unique:");
                for option in options {
                    println!("        - {}", option.value);
                }
            }
            Control::MultiSelect { options } => {
                println!("      choix multiples (séparés par des virgules):");
                for option in options {
                    println!("        - {}", option.value);
                }
            }
            Control::Phone { max_len } => {
                println!("      téléphone ({max_len} chiffres, 06/07)");
            }
            Control::Date => println!("      date"),
            Control::Number => println!("      nombre"),
            Control::Email => println!("      email"),
            Control::Text | Control::TextArea => {}
        }
    }
    Ok(())
}

/// Parses one `--answer <question_id>=<value>` argument.
pub fn parse_answer(raw: &str) -> Result<(u64, &str), String> {
    let (id, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("Réponse invalide '{raw}' (attendu: id=valeur)"))?;
    let id = id
        .trim()
        .parse::<u64>()
        .map_err(|_| format!("Identifiant de question invalide '{id}'"))?;
    Ok((id, value))
}

pub async fn submit(
    ctx: &Context,
    type_prospection: &str,
    raw_answers: &[String],
    comment: Option<&str>,
    force: bool,
) -> Result<(), String> {
    if !ctx.enter(View::AgentIntake)? {
        return Ok(());
    }
    let service = ProspectionService::new(&ctx.gateway);
    let form = service.form().await.map_err(|e| e.to_string())?;

    let mut answers = AnswerSet::new();
    for raw in raw_answers {
        let (id, value) = parse_answer(raw)?;
        let question = form
            .questions
            .iter()
            .find(|q| q.id == id)
            .ok_or_else(|| format!("Question {id} inconnue"))?;
        answers.set(question, value);
    }

    let errors = validation::validate(&form.questions, &answers, type_prospection);
    if !errors.is_empty() {
        for (field, message) in &errors {
            eprintln!("  {field}: {message}");
        }
        return Err("Le formulaire contient des erreurs".to_string());
    }

    let result = service
        .create(type_prospection, &answers, comment, force)
        .await;
    match result {
        Ok((id, message)) => {
            println!("{} (id {id})", message.green());
            Ok(())
        }
        Err(GatewayError::Duplicate(message)) => {
            println!("{}", message.yellow());
            if confirm("Voulez-vous continuer quand même ?") {
                let (id, message) = service
                    .create(type_prospection, &answers, comment, true)
                    .await
                    .map_err(|e| e.to_string())?;
                println!("{} (id {id})", message.green());
                Ok(())
            } else {
                println!("Enregistrement annulé");
                Ok(())
            }
        }
        Err(e) => Err(e.to_string()),
    }
}

fn confirm(prompt: &str) -> bool {
    print!("{prompt} (o/N) ");
    let _ = std::io::stdout().flush();
    let mut line = String::new();
    if std::io::stdin().read_line(&mut line).is_err() {
        return false;
    }
    matches!(line.trim().to_lowercase().as_str(), "o" | "oui")
}

pub async fn list(ctx: &Context) -> Result<(), String> {
    if !ctx.enter(View::AgentList)? {
        return Ok(());
    }
    let (prospections, total) = ProspectionService::new(&ctx.gateway)
        .my_prospections()
        .await
        .map_err(|e| e.to_string())?;

    println!("{total} prospection(s)");
    for p in prospections {
        let phone = p.prospect_phone.as_deref().map(format_phone).unwrap_or_default();
        println!(
            "{:>5}  {}  {:<24} {:<12} {}",
            p.id,
            format_date(&p.created_at),
            p.type_prospection_display,
            p.status_display,
            phone
        );
    }
    Ok(())
}

pub async fn show(ctx: &Context, id: u64) -> Result<(), String> {
    if !ctx.enter(View::AgentList)? {
        return Ok(());
    }
    let details = ProspectionService::new(&ctx.gateway)
        .details(id)
        .await
        .map_err(|e| e.to_string())?;

    if ctx.format.is_json() {
        ctx.format.print_json(&serde_json::json!({
            "id": details.prospection.id,
            "statut": details.prospection.status,
            "reponses": details.responses_map,
        }));
        return Ok(());
    }

    let p = &details.prospection;
    println!("Prospection {} — {}", p.id, p.type_prospection_display);
    println!("  Créée le {}", format_date(&p.created_at));
    println!("  Statut: {}", p.status_display);
    let transitions: Vec<&str> = p
        .status
        .possible_transitions()
        .iter()
        .map(|s| s.display_name())
        .collect();
    if !transitions.is_empty() {
        println!("  Transitions possibles: {}", transitions.join(", "));
    }
    if let Some(creator) = &p.creator {
        println!("  Créée par {} {}", creator.first_name, creator.last_name);
    }
    if let Some(comment) = &p.comment {
        println!("  Commentaire: {comment}");
    }
    println!();
    for response in &details.responses {
        let value = if response.formatted_value.is_empty() {
            &response.value
        } else {
            &response.formatted_value
        };
        println!("  {} : {}", response.question_text, value);
    }
    Ok(())
}

pub async fn stats(ctx: &Context) -> Result<(), String> {
    if !ctx.enter(View::AgentStats)? {
        return Ok(());
    }
    let stats = ProspectionService::new(&ctx.gateway)
        .statistics()
        .await
        .map_err(|e| e.to_string())?;

    println!("Total: {}", stats.total);
    println!("Aujourd'hui: {}", stats.today);
    for (status, count) in &stats.status_breakdown {
        println!("  {status:<12} {count}");
    }
    Ok(())
}
