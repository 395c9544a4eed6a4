//! # Templates Maud — HTML Server-Side Rendering
//!
//! Cada passo da entrevista é um **fragmento HTML** que o HTMX injeta
//! em `#entrevista`. Sem JavaScript de aplicação: os botões de opção
//! são `submit` com `name="valor"`, então o formulário também funciona
//! sem HTMX (a resposta vem embrulhada em [`full_page()`]).
//!
//! | Função | Tipo | Descrição |
//! |--------|------|-----------|
//! | [`full_page()`] | Página completa | Layout + estilos + HTMX |
//! | [`question_fragment()`] | Fragmento | Pergunta atual com botões |
//! | [`result_fragment()`] | Fragmento | Tabela de respostas + dicas |
//! | [`expired_fragment()`] | Fragmento | Sessão inexistente |
//! | [`error_fragment()`] | Fragmento | Entrevista abortada |

use maud::{html, Markup, PreEscaped, DOCTYPE};
use uuid::Uuid;

use crate::core::{question, AnswerMap, DiagnosisError, Question, QuestionKey, QuestionKind};
use crate::inference::Tip;
use crate::markup::{self, Segment};

const CSS: &str = r#"
body { font-family: -apple-system, Segoe UI, Roboto, Helvetica, Arial, sans-serif; margin: 0; background: #f6f7f9; color: #1d232b; }
.container { max-width: 760px; margin: 0 auto; padding: 24px 18px 48px; }
h1, h2 { font-size: 28px; }
.subtitle { color: #5b6470; margin-top: -8px; }
.step { font-size: 15px; color: #5b6470; text-transform: uppercase; letter-spacing: .04em; }
.big { font-size: 22px; line-height: 1.45; margin: 10px 0 18px; }
.choices { display: flex; flex-direction: column; gap: 10px; }
.btn { font-size: 20px; padding: 14px 18px; border: 1px solid #c7ccd3; border-radius: 10px; background: #fff; cursor: pointer; text-align: left; text-decoration: none; color: inherit; display: inline-block; }
.btn:hover { background: #eef3fb; border-color: #7aa2e3; }
textarea { width: 100%; font-size: 18px; padding: 10px; box-sizing: border-box; margin-bottom: 12px; }
.table { border-collapse: collapse; width: 100%; background: #fff; }
.table td, .table th { font-size: 18px; padding: 8px; border-bottom: 1px solid #e2e5ea; text-align: left; }
.tips li { font-size: 19px; line-height: 1.45; margin-bottom: 8px; }
.toast { margin: 18px 0; padding: 12px 16px; border-radius: 8px; background: #e8f1fd; color: #174a8b; }
.error { padding: 12px 16px; border-radius: 8px; background: #fdecea; color: #8a1c12; }
"#;

/// Renderiza `**negrito**` como `<strong>`; o resto é escapado pelo Maud.
fn rich(text: &str) -> Markup {
    html! {
        @for segment in markup::segments(text) {
            @match segment {
                Segment::Plain(t) => { (t) },
                Segment::Bold(t) => { strong { (t) } },
            }
        }
    }
}

/// Label legível de uma resposta de escolha, sem marcação.
fn choice_label(key: QuestionKey, value: &str) -> Option<String> {
    question::find(key)
        .and_then(|q| q.label_for(value))
        .map(markup::plain)
}

fn answer_url(id: Uuid) -> String {
    format!("/entrevista/{id}/responder")
}

fn restart_url(id: Uuid) -> String {
    format!("/entrevista/{id}/reiniciar")
}

/// Página completa com `content` dentro de `#entrevista`.
pub fn full_page(content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="es-AR" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { "Entrevista de arranque" }
                style { (PreEscaped(CSS)) }
                script src="https://unpkg.com/htmx.org@2.0.4" {}
            }
            body {
                main class="container" {
                    h1 { "Entrevista de arranque (orientativa)" }
                    p class="subtitle" { em { "Lenguaje local. No reemplaza pruebas de taller." } }
                    div #entrevista { (content) }
                }
            }
        }
    }
}

/// Pergunta atual. `step` é o número 1-based exibido no topo.
pub fn question_fragment(id: Uuid, question: &Question, step: usize) -> Markup {
    let action = answer_url(id);
    html! {
        div class="question" data-key=(question.key.as_str()) {
            div class="step" { "Pregunta " (step) }
            div class="big" { (rich(question.prompt)) }
            form method="post" action=(action) hx-post=(action) hx-target="#entrevista" hx-swap="innerHTML" hx-sync="this:drop" {
                input type="hidden" name="pregunta" value=(question.key.as_str());
                @match question.kind {
                    QuestionKind::Choice(options) => {
                        div class="choices" {
                            @for option in options {
                                button type="submit" class="btn" name="valor" value=(option.value) {
                                    (rich(option.label))
                                }
                            }
                        }
                    },
                    QuestionKind::Text { placeholder, optional } => {
                        textarea name="valor" rows="4" placeholder=(placeholder) required[!optional] {}
                        button type="submit" class="btn" { "Continuar" }
                    },
                }
            }
        }
    }
}

/// Resultado: respostas em ordem de inserção, dicas em ordem de emissão
/// e o botão de nova entrevista.
pub fn result_fragment(id: Uuid, answers: &AnswerMap, tips: &[Tip]) -> Markup {
    let restart = restart_url(id);
    html! {
        div class="result" {
            h2 { "Resultado orientativo" }
            table class="table" {
                thead { tr { th { "Ítem" } th { "Valor" } } }
                tbody {
                    @for (key, value) in answers.iter() {
                        tr data-key=(key.as_str()) {
                            td { (key.as_str()) }
                            td title=[choice_label(key, value)] {
                                (value)
                            }
                        }
                    }
                }
            }
            h2 { "Consejos para seguir" }
            ul class="tips" {
                @for tip in tips {
                    li class={ "tip tip-" (tip.topic().as_str()) } { (rich(tip.text())) }
                }
            }
            div class="toast" { "Orientativo. Usá criterio de taller." }
            form method="post" action=(restart) hx-post=(restart) hx-target="#entrevista" hx-swap="innerHTML" {
                button type="submit" class="btn" { "Nueva entrevista" }
            }
        }
    }
}

pub fn expired_fragment() -> Markup {
    html! {
        div class="error" {
            "La entrevista ya no existe (venció o fue reiniciada)."
        }
        p { a href="/" class="btn" { "Nueva entrevista" } }
    }
}

/// Entrevista abortada por erro de contrato.
pub fn error_fragment(error: &DiagnosisError) -> Markup {
    html! {
        div class="error" {
            strong { "No se pudo continuar la entrevista." }
            br;
            (error.to_string())
        }
        p { a href="/" class="btn" { "Nueva entrevista" } }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::CATALOG;

    #[test]
    fn rich_escapes_and_bolds() {
        assert_eq!(
            rich("**<b>** & co").into_string(),
            "<strong>&lt;b&gt;</strong> &amp; co"
        );
    }

    #[test]
    fn question_renders_every_choice() {
        let html = question_fragment(Uuid::nil(), &CATALOG[0], 1).into_string();
        for option in CATALOG[0].choices() {
            assert!(html.contains(&format!("value=\"{}\"", option.value)));
        }
        assert!(html.contains("Pregunta 1"));
        assert!(html.contains("<strong>arrancar</strong>"));
    }

    #[test]
    fn question_form_carries_its_key() {
        let html = question_fragment(Uuid::nil(), &CATALOG[1], 2).into_string();
        assert!(html.contains(r#"<input type="hidden" name="pregunta" value="vel_burro">"#));
        assert!(html.contains(r#"hx-sync="this:drop""#));
    }

    #[test]
    fn notes_render_as_textarea() {
        let notas = CATALOG.last().unwrap();
        let html = question_fragment(Uuid::nil(), notas, 7).into_string();
        assert!(html.contains("<textarea"));
        assert!(!html.contains("required"));
    }
}
