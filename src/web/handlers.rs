//! # Handlers HTTP — Os Endpoints da Entrevista
//!
//! Cada função pública neste módulo é um handler Axum, mapeado a uma
//! rota em [`super::create_router()`]. As rotas da entrevista seguem o
//! padrão **HTMX fragment**: com o header `HX-Request` devolvem só o
//! fragmento; sem ele, a página completa.
//!
//! | Handler | Método | Retorno | Uso |
//! |---------|--------|---------|-----|
//! | `index` | GET | Redirect | Abre sessão nova |
//! | `show_interview` | GET | HTML completo | Passo atual da sessão |
//! | `answer` | POST | HTMX fragment / Redirect | Registra resposta, mostra próximo passo |
//! | `restart` | POST | HTMX fragment | Descarta sessão e abre outra |
//! | `diagnose` | POST | JSON | Dicas para um mapa de respostas completo |
//! | `status` | GET | JSON | Número de sessões ativas |
//!
//! ## Erros de Contrato
//!
//! Um [`DiagnosisError`] durante a entrevista **aborta** a sessão: ela é
//! removida e o usuário vê a mensagem com um link para recomeçar.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::{Form, Json};
use chrono::Utc;
use maud::Markup;
use uuid::Uuid;

use super::state::AppState;
use super::templates;
use crate::core::{AnswerMap, DiagnosisError, Question};
use crate::inference::{InferenceEngine, Tip, TipList, Topic};
use crate::interview::Interview;

/// Passo da entrevista a ser renderizado.
enum View {
    Question {
        question: &'static Question,
        step: usize,
    },
    Result {
        answers: AnswerMap,
        tips: TipList,
    },
}

impl View {
    /// Pergunta pendente, ou o resultado se a entrevista terminou.
    fn of(interview: &Interview) -> Result<Self, DiagnosisError> {
        match interview.current() {
            Some(question) => Ok(View::Question {
                question,
                step: interview.step(),
            }),
            None => {
                let answers = interview.answers().clone();
                let tips = InferenceEngine::infer(&answers)?;
                Ok(View::Result { answers, tips })
            }
        }
    }

    fn render(&self, id: Uuid) -> Markup {
        match self {
            View::Question { question, step } => templates::question_fragment(id, question, *step),
            View::Result { answers, tips } => templates::result_fragment(id, answers, tips),
        }
    }
}

/// Converte Maud Markup em resposta Html<String> do Axum.
fn markup_to_html(m: Markup) -> Html<String> {
    Html(m.into_string())
}

fn is_htmx(headers: &HeaderMap) -> bool {
    headers.contains_key("hx-request")
}

/// Fragmento para o HTMX, página completa para navegação normal.
fn respond(headers: &HeaderMap, fragment: Markup) -> Html<String> {
    if is_htmx(headers) {
        markup_to_html(fragment)
    } else {
        markup_to_html(templates::full_page(fragment))
    }
}

/// Dados do formulário de resposta.
#[derive(serde::Deserialize)]
pub struct AnswerForm {
    /// Chave da pergunta exibida quando o formulário foi montado.
    #[serde(default)]
    pub pregunta: String,
    #[serde(default)]
    pub valor: String,
}

fn interview_url(id: Uuid) -> String {
    format!("/entrevista/{id}")
}

/// GET `/` — abre uma sessão nova e redireciona para ela.
///
/// O redirect mantém o recarregamento da página estável: recarregar
/// `/entrevista/{id}` mostra o mesmo passo em vez de abrir outra sessão.
pub async fn index(State(state): State<AppState>) -> Redirect {
    let id = state.start_session();
    Redirect::to(&interview_url(id))
}

/// GET `/entrevista/{id}` — página completa com o passo atual.
///
/// Conta como atividade: a sessão não vence enquanto a página é recarregada.
pub async fn show_interview(State(state): State<AppState>, Path(id): Path<Uuid>) -> Html<String> {
    let view = state.sessions.write().get_mut(&id).map(|session| {
        session.last_seen = Utc::now();
        View::of(&session.interview)
    });

    let content = match view {
        Some(Ok(view)) => view.render(id),
        Some(Err(e)) => {
            state.end_session(id);
            tracing::warn!(session = %id, error = %e, "Entrevista abortada");
            templates::error_fragment(&e)
        }
        None => templates::expired_fragment(),
    };
    markup_to_html(templates::full_page(content))
}

/// POST `/entrevista/{id}/responder` — registra a resposta da pergunta atual.
///
/// ## Fluxo
///
/// ```text
/// 1. Busca a sessão (inexistente → fragmento "venció")
/// 2. `pregunta` ≠ pergunta atual → reenvio; mostra o passo atual sem gravar
/// 3. Interview::answer(valor)
/// 4. Próxima pergunta, ou InferenceEngine::infer se terminou
/// 5. Erro de contrato → remove a sessão e mostra o erro
/// ```
///
/// Sem HTMX, o sucesso responde com redirect para `/entrevista/{id}`
/// (post/redirect/get): recarregar a página não reenvia o formulário.
pub async fn answer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
    Form(form): Form<AnswerForm>,
) -> Response {
    let now = Utc::now();
    let mut sessions = state.sessions.write();
    let Some(session) = sessions.get_mut(&id) else {
        drop(sessions);
        tracing::debug!(session = %id, "Resposta para sessão inexistente");
        return respond(&headers, templates::expired_fragment()).into_response();
    };

    session.last_seen = now;
    let current = session.interview.current().map(|q| q.key.as_str());
    let resubmitted = current != Some(form.pregunta.as_str());
    let result = if resubmitted {
        View::of(&session.interview)
    } else {
        session
            .interview
            .answer(&form.valor)
            .and_then(|_| View::of(&session.interview))
    };
    let elapsed = session.elapsed(now);
    if result.is_err() {
        sessions.remove(&id);
    }
    drop(sessions); // libera o lock antes de renderizar

    if resubmitted {
        tracing::debug!(
            session = %id,
            pregunta = %form.pregunta,
            atual = ?current,
            "Reenvio de resposta ignorado"
        );
    }

    match result {
        Ok(view) => {
            if let (false, View::Result { answers, tips }) = (resubmitted, &view) {
                tracing::info!(
                    session = %id,
                    branch = ?answers.branch(),
                    tips = tips.len(),
                    secs = elapsed.num_seconds(),
                    "Entrevista concluída"
                );
            }
            if is_htmx(&headers) {
                markup_to_html(view.render(id)).into_response()
            } else {
                Redirect::to(&interview_url(id)).into_response()
            }
        }
        Err(e) => {
            tracing::warn!(session = %id, error = %e, "Entrevista abortada");
            respond(&headers, templates::error_fragment(&e)).into_response()
        }
    }
}

/// POST `/entrevista/{id}/reiniciar` — descarta a sessão e começa outra.
///
/// A nova sessão nunca reaproveita o mapa anterior. Com HTMX, devolve a
/// primeira pergunta e atualiza a URL via `HX-Push-Url`; sem HTMX,
/// redireciona.
pub async fn restart(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
) -> Response {
    state.end_session(id);
    let new_id = state.start_session();
    let url = interview_url(new_id);

    if !is_htmx(&headers) {
        return Redirect::to(&url).into_response();
    }

    let content = match View::of(&Interview::new()) {
        Ok(view) => view.render(new_id),
        Err(e) => templates::error_fragment(&e),
    };
    ([("HX-Push-Url", url)], markup_to_html(content)).into_response()
}

// ─── API JSON ────────────────────────────────────────────────────

/// Dica serializada para a API.
#[derive(serde::Serialize)]
pub struct TipView {
    pub topic: Topic,
    /// Texto sem marcação `**`.
    pub text: String,
}

impl From<&Tip> for TipView {
    fn from(tip: &Tip) -> Self {
        Self {
            topic: tip.topic(),
            text: tip.plain_text(),
        }
    }
}

#[derive(serde::Serialize)]
pub struct DiagnosisResponse {
    pub tips: Vec<TipView>,
}

#[derive(serde::Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

fn api_error(status: StatusCode, error: String) -> Response {
    tracing::warn!(%status, %error, "Diagnóstico rejeitado");
    (status, Json(ErrorResponse { error })).into_response()
}

/// POST `/api/diagnostico` — dicas para um mapa de respostas em JSON.
///
/// Corpo: `{ "arranque_estado": "gira", ... }`. Chaves e valores são
/// validados contra o catálogo; faltando uma chave incondicional, 422.
pub async fn diagnose(payload: Result<Json<AnswerMap>, JsonRejection>) -> Response {
    let answers = match payload {
        Ok(Json(answers)) => answers,
        Err(rejection) => return api_error(rejection.status(), rejection.body_text()),
    };

    match InferenceEngine::infer(&answers) {
        Ok(tips) => Json(DiagnosisResponse {
            tips: tips.iter().map(TipView::from).collect(),
        })
        .into_response(),
        Err(e) => api_error(StatusCode::UNPROCESSABLE_ENTITY, e.to_string()),
    }
}

/// Resposta do endpoint `/status`.
#[derive(serde::Serialize)]
pub struct StatusResponse {
    pub sessions: usize,
}

/// GET `/status` — número de sessões ativas.
pub async fn status(State(state): State<AppState>) -> Json<StatusResponse> {
    Json(StatusResponse {
        sessions: state.session_count(),
    })
}
