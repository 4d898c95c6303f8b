// Ficheiro: src/core/types.rs
// Descrição: Tipos fundamentais da busca (scores, profundidade, tipo de lance).

/// Score em centipawns, sempre do ponto de vista de quem joga (negamax).
pub type Score = i32;

/// Profundidade restante da busca, em plies.
pub type Depth = u8;

/// Infinito da busca. Nenhum score real chega perto disso.
pub const INF: Score = 1_000_000;

/// Sentinela de xeque-mate devolvida pelo avaliador (lado a mover está em mate).
pub const MATE_SCORE: Score = INF - 1;

/// Empates reconhecidos (afogamento, material insuficiente) valem exatamente zero.
pub const DRAW_SCORE: Score = 0;

/// Scores com magnitude acima disto são tratados como mate forçado.
pub const MATE_THRESHOLD: Score = MATE_SCORE - 256;

/// Profundidade máxima suportada pelas tabelas por-ply (killers).
pub const MAX_DEPTH: usize = 64;

/// Tipo de um lance, decodificado uma única vez por lance.
/// Evita re-derivar roque/en-passant/captura com chamadas repetidas ao board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveKind {
    Normal,
    Capture,
    Promotion { capture: bool },
    CastleKingside,
    CastleQueenside,
    EnPassant,
}

impl MoveKind {
    /// Captura comum, en passant ou promoção que captura.
    pub fn is_capture(self) -> bool {
        matches!(
            self,
            MoveKind::Capture | MoveKind::EnPassant | MoveKind::Promotion { capture: true }
        )
    }
}
