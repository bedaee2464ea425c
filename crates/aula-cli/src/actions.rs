//! Command handlers: each one instantiates the generic client components for
//! the chosen resource and renders the outcome to the terminal.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, anyhow, bail};
use aula_client::{
    ClientError, ConfirmGate, ConfirmRequest, FormController, ListState, ReqwestTransport,
    ResourceClient, Table,
};
use aula_client::resource::SortDir;
use serde_json::Value;

use crate::prompt::{TerminalConfirm, select_rows};
use crate::resources::ResourceKind;

fn resource_client(base_url: &str, kind: ResourceKind) -> ResourceClient {
    ResourceClient::new(
        Arc::new(ReqwestTransport::new(base_url.to_string())),
        kind.spec().endpoint,
    )
}

/// `campo=valor` keeps the value as a string; `campo:=valor` parses the
/// value as JSON for numbers, booleans and nulls.
fn parse_field_pairs(pairs: &[String]) -> anyhow::Result<Vec<(String, Value)>> {
    let mut fields = Vec::with_capacity(pairs.len());
    for pair in pairs {
        if let Some((key, raw)) = pair.split_once(":=") {
            let value: Value = serde_json::from_str(raw)
                .with_context(|| format!("'{raw}' is not valid JSON (in '{pair}')"))?;
            fields.push((key.to_string(), value));
        } else if let Some((key, value)) = pair.split_once('=') {
            fields.push((key.to_string(), Value::String(value.to_string())));
        } else {
            bail!("expected campo=valor or campo:=json, got '{pair}'");
        }
    }
    Ok(fields)
}

fn print_field_errors(errors: &std::collections::BTreeMap<String, Vec<String>>) {
    eprintln!("Validation failed:");
    for (field, messages) in errors {
        for message in messages {
            eprintln!("  {field}: {message}");
        }
    }
}

fn record_id(record: &Value) -> String {
    record["id"]
        .as_str()
        .map(str::to_string)
        .unwrap_or_else(|| record["id"].to_string())
}

#[allow(clippy::too_many_arguments)]
pub async fn list(
    base_url: &str,
    kind: ResourceKind,
    page: i64,
    per_page: i64,
    search: Option<String>,
    sort_by: Option<String>,
    desc: bool,
    filters: Vec<String>,
) -> anyhow::Result<()> {
    let spec = kind.spec();
    let extra = parse_field_pairs(&filters)?
        .into_iter()
        .map(|(k, v)| {
            let v = match v {
                Value::String(s) => s,
                other => other.to_string(),
            };
            (k, v)
        })
        .collect();

    let mut state = ListState::<Value>::new(resource_client(base_url, kind), spec.mode)
        .with_extra_filters(extra)
        .prepare(|request| {
            request.page = page;
            request.per_page = per_page;
            request.search = search;
            request.sort = sort_by.map(|field| {
                (field, if desc { SortDir::Desc } else { SortDir::Asc })
            });
        });

    state.load().await;

    if let Some(error) = state.error() {
        bail!("{error}");
    }

    let columns = (spec.columns)();
    let table = Table::new(&columns)
        .empty_message(spec.empty_message)
        .sorted_by(state.sort());
    print!("{}", table.render(state.items()));
    if state.total_pages() > 1 || state.total_items() > state.items().len() as i64 {
        println!(
            "Página {} de {} ({} registros)",
            state.current_page(),
            state.total_pages(),
            state.total_items()
        );
    }
    Ok(())
}

pub async fn show(base_url: &str, kind: ResourceKind, id: &str) -> anyhow::Result<()> {
    let record: Value = resource_client(base_url, kind).get(id).await?;
    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}

pub async fn create(
    base_url: &str,
    kind: ResourceKind,
    fields: Vec<String>,
    escudo: Option<PathBuf>,
) -> anyhow::Result<()> {
    if let Some(path) = escudo {
        if kind != ResourceKind::Instituciones {
            bail!("--escudo only applies to instituciones");
        }
        return create_institution_with_crest(base_url, fields, path).await;
    }

    let spec = kind.spec();
    let mut form = FormController::create(
        resource_client(base_url, kind),
        spec.required.to_vec(),
    );
    for (name, value) in parse_field_pairs(&fields)? {
        form.set_field(name, value)?;
    }

    match form.submit::<Value>().await {
        Ok(record) => {
            println!("Created {} {}", kind.singular(), record_id(&record));
            Ok(())
        }
        Err(ClientError::Validation { errors }) => {
            print_field_errors(&errors);
            Err(anyhow!("validation failed"))
        }
        Err(e) => Err(e.into()),
    }
}

/// Institution create with a crest file: `multipart/form-data` with the
/// scalar fields plus an `escudo` image part.
async fn create_institution_with_crest(
    base_url: &str,
    fields: Vec<String>,
    path: PathBuf,
) -> anyhow::Result<()> {
    let bytes = tokio::fs::read(&path)
        .await
        .with_context(|| format!("cannot read {}", path.display()))?;
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("escudo.png")
        .to_string();
    let mime = match path.extension().and_then(|e| e.to_str()) {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("webp") => "image/webp",
        _ => "image/png",
    };

    let mut multipart = reqwest::multipart::Form::new().part(
        "escudo",
        reqwest::multipart::Part::bytes(bytes)
            .file_name(file_name)
            .mime_str(mime)?,
    );
    for (name, value) in parse_field_pairs(&fields)? {
        let text = match value {
            Value::String(s) => s,
            other => other.to_string(),
        };
        multipart = multipart.text(name, text);
    }

    let url = format!("{}/instituciones", base_url.trim_end_matches('/'));
    let response = reqwest::Client::new()
        .post(&url)
        .multipart(multipart)
        .send()
        .await?;
    let status = response.status().as_u16();
    let body = response.bytes().await?;

    if (200..300).contains(&status) {
        let record: Value = serde_json::from_slice(&body)?;
        println!("Created institución {}", record_id(&record));
        if let Some(escudo_url) = record["escudo_url"].as_str() {
            println!("Escudo: {escudo_url}");
        }
        Ok(())
    } else {
        match aula_client::error::classify_response(status, &body) {
            ClientError::Validation { errors } => {
                print_field_errors(&errors);
                Err(anyhow!("validation failed"))
            }
            other => Err(other.into()),
        }
    }
}

pub async fn edit(
    base_url: &str,
    kind: ResourceKind,
    id: &str,
    fields: Vec<String>,
) -> anyhow::Result<()> {
    let spec = kind.spec();
    let mut form = FormController::edit(resource_client(base_url, kind), id, spec.required.to_vec());
    form.load_record().await?;
    for (name, value) in parse_field_pairs(&fields)? {
        form.set_field(name, value)?;
    }

    match form.submit::<Value>().await {
        Ok(record) => {
            println!("Updated {} {}", kind.singular(), record_id(&record));
            Ok(())
        }
        Err(ClientError::Validation { errors }) => {
            print_field_errors(&errors);
            Err(anyhow!("validation failed"))
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn delete(
    base_url: &str,
    kind: ResourceKind,
    id: &str,
    yes: bool,
) -> anyhow::Result<()> {
    if !yes {
        let gate = ConfirmGate::new(TerminalConfirm);
        let accepted = gate
            .confirm(ConfirmRequest::danger(
                format!("Eliminar {}", kind.singular()),
                format!("¿Eliminar {} {id}? Esta acción no se puede deshacer.", kind.singular()),
            ))
            .await?;
        if !accepted {
            println!("Cancelado.");
            return Ok(());
        }
    }

    resource_client(base_url, kind).delete(id).await?;
    println!("Eliminado {} {id}", kind.singular());
    Ok(())
}

pub async fn bulk_delete(
    base_url: &str,
    kind: ResourceKind,
    page: i64,
    per_page: i64,
    search: Option<String>,
) -> anyhow::Result<()> {
    let spec = kind.spec();
    let client = resource_client(base_url, kind);
    let mut state = ListState::<Value>::new(client.clone(), spec.mode).prepare(|request| {
        request.page = page;
        request.per_page = per_page;
        request.search = search;
    });
    state.load().await;

    if let Some(error) = state.error() {
        bail!("{error}");
    }
    if state.items().is_empty() {
        println!("{}", spec.empty_message);
        return Ok(());
    }

    let columns = (spec.columns)();
    let table = Table::new(&columns).selectable();
    print!("{}", table.render(state.items()));

    let labels: Vec<String> = state
        .items()
        .iter()
        .map(|item| {
            columns
                .iter()
                .map(|c| (c.accessor)(item))
                .collect::<Vec<_>>()
                .join("  ")
        })
        .collect();
    let selected = select_rows("Selecciona los registros a eliminar".to_string(), labels).await;
    if selected.is_empty() {
        println!("Nada seleccionado.");
        return Ok(());
    }

    let ids: Vec<String> = selected
        .iter()
        .map(|&index| record_id(&state.items()[index]))
        .collect();

    let gate = ConfirmGate::new(TerminalConfirm);
    let accepted = gate
        .confirm(ConfirmRequest::danger(
            "Eliminación masiva",
            format!("¿Eliminar {} registro(s)?", ids.len()),
        ))
        .await?;
    if !accepted {
        println!("Cancelado.");
        return Ok(());
    }

    let outcome = client.bulk_delete(&ids).await;
    if outcome.all_succeeded() {
        println!("{} registro(s) eliminados.", outcome.succeeded.len());
    } else {
        println!(
            "{} eliminados, {} fallidos:",
            outcome.succeeded.len(),
            outcome.failed.len()
        );
        for (id, error) in &outcome.failed {
            println!("  {id}: {error}");
        }
    }

    // Reload the same page so the listing reflects the deletions
    state.refresh().await;
    let table = Table::new(&columns).empty_message(spec.empty_message);
    print!("{}", table.render(state.items()));
    Ok(())
}

pub async fn transfer(
    base_url: &str,
    grupo: &str,
    estudiante: &str,
    destino: &str,
    yes: bool,
) -> anyhow::Result<()> {
    if !yes {
        let gate = ConfirmGate::new(TerminalConfirm);
        let accepted = gate
            .confirm(
                ConfirmRequest::new(
                    "Trasladar estudiante",
                    format!("¿Trasladar al estudiante {estudiante} del grupo {grupo} al grupo {destino}?"),
                )
                .with_labels("Trasladar", "Cancelar"),
            )
            .await?;
        if !accepted {
            println!("Cancelado.");
            return Ok(());
        }
    }

    let client = ResourceClient::new(
        Arc::new(ReqwestTransport::new(base_url.to_string())),
        "/grupos",
    );
    client
        .put_action(
            &format!("{grupo}/estudiantes/{estudiante}/trasladar"),
            serde_json::json!({ "grupo_destino_id": destino }),
        )
        .await?;
    println!("Estudiante trasladado.");
    Ok(())
}
