//! # Configuração — Linha de Comando e Variáveis de Ambiente
//!
//! | Flag | Variável | Padrão |
//! |------|----------|--------|
//! | `--addr` | `DIAGNOSTICO_ADDR` | `0.0.0.0:8080` |
//! | `--session-ttl-min` | `DIAGNOSTICO_SESSION_TTL_MIN` | `30` |
//! | `--terminal` | — | desligado |
//!
//! O nível de log continua vindo de `RUST_LOG` (ver `main`).

use std::net::SocketAddr;
use std::time::Duration;

use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "entrevista-arranque")]
#[command(about = "Entrevista orientativa para fallas de arranque", long_about = None)]
#[command(version)]
pub struct Config {
    /// Endereço do servidor HTTP.
    #[arg(long, env = "DIAGNOSTICO_ADDR", default_value = "0.0.0.0:8080")]
    pub addr: SocketAddr,

    /// Minutos sem atividade até uma sessão web ser descartada.
    #[arg(long, env = "DIAGNOSTICO_SESSION_TTL_MIN", default_value_t = 30)]
    pub session_ttl_min: u32,

    /// Roda a entrevista no terminal em vez de servir HTTP.
    #[arg(long)]
    pub terminal: bool,
}

impl Config {
    pub fn session_ttl(&self) -> chrono::Duration {
        chrono::Duration::minutes(i64::from(self.session_ttl_min))
    }

    /// Intervalo da varredura de sessões vencidas: um quarto do TTL,
    /// entre 15 s e 5 min.
    pub fn sweep_interval(&self) -> Duration {
        let quarter = u64::from(self.session_ttl_min) * 60 / 4;
        Duration::from_secs(quarter.clamp(15, 300))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_flag_and_ttl() {
        let cfg = Config::try_parse_from(["entrevista-arranque", "--terminal", "--session-ttl-min", "4"])
            .unwrap();
        assert!(cfg.terminal);
        assert_eq!(cfg.session_ttl(), chrono::Duration::minutes(4));
        assert_eq!(cfg.sweep_interval(), Duration::from_secs(60));
    }

    #[test]
    fn rejects_bad_addr() {
        assert!(Config::try_parse_from(["entrevista-arranque", "--addr", "no-es-una-direccion"]).is_err());
    }

    #[test]
    fn sweep_interval_is_clamped() {
        let short = Config::try_parse_from(["x", "--session-ttl-min", "0"]).unwrap();
        let long = Config::try_parse_from(["x", "--session-ttl-min", "600"]).unwrap();
        assert_eq!(short.sweep_interval(), Duration::from_secs(15));
        assert_eq!(long.sweep_interval(), Duration::from_secs(300));
    }
}
