//! # Estado da Aplicação Web
//!
//! Cada visitante tem a sua própria [`Session`], com o seu próprio
//! [`Interview`]. O mapa de sessões é o único estado compartilhado;
//! nenhuma sessão enxerga as respostas de outra.
//!
//! ## Ciclo de Vida de Uma Sessão
//!
//! ```text
//! GET /                 → start_session()   → Interview vazio
//! POST …/responder      → touch + answer()  (um passo por request)
//! POST …/reiniciar      → end_session() + start_session()
//! varredura periódica   → sweep_expired()   (abandono = descarte)
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use uuid::Uuid;

use crate::interview::Interview;

/// Entrevista em curso de um visitante.
pub struct Session {
    pub interview: Interview,
    pub created_at: DateTime<Utc>,
    /// Última interação — base para a expiração.
    pub last_seen: DateTime<Utc>,
}

impl Session {
    fn new(now: DateTime<Utc>) -> Self {
        Self {
            interview: Interview::new(),
            created_at: now,
            last_seen: now,
        }
    }

    /// Tempo desde a abertura da sessão.
    pub fn elapsed(&self, now: DateTime<Utc>) -> chrono::Duration {
        now - self.created_at
    }
}

/// Estado compartilhado da aplicação Axum.
#[derive(Clone)]
pub struct AppState {
    /// Sessões ativas, protegidas por `RwLock`.
    pub sessions: Arc<RwLock<HashMap<Uuid, Session>>>,
    /// Tempo sem atividade até a sessão ser descartada.
    pub session_ttl: chrono::Duration,
}

impl AppState {
    pub fn new(session_ttl: chrono::Duration) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            session_ttl,
        }
    }

    /// Abre uma sessão nova, com mapa de respostas vazio.
    pub fn start_session(&self) -> Uuid {
        let id = Uuid::new_v4();
        self.sessions.write().insert(id, Session::new(Utc::now()));
        tracing::info!(session = %id, "Nova entrevista");
        id
    }

    /// Descarta a sessão. Retorna `false` se ela já não existia.
    pub fn end_session(&self, id: Uuid) -> bool {
        self.sessions.write().remove(&id).is_some()
    }

    pub fn session_count(&self) -> usize {
        self.sessions.read().len()
    }

    /// Remove sessões sem atividade há mais de `session_ttl`.
    pub fn sweep_expired(&self, now: DateTime<Utc>) -> usize {
        let mut sessions = self.sessions.write();
        let before = sessions.len();
        sessions.retain(|_, s| now - s.last_seen <= self.session_ttl);
        before - sessions.len()
    }
}
