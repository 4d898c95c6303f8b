use thiserror::Error;

/// Erros expostos pela API do motor e pelo frontend UCI.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("FEN inválido: {0}")]
    InvalidFen(String),

    #[error("lance ilegal ou mal formado: {0}")]
    IllegalMove(String),

    /// A posição da raiz não tem lances legais (mate ou afogamento).
    /// O chamador precisa distinguir "sem lance" de um lance real.
    #[error("nenhum lance legal na posição da raiz")]
    NoLegalMoves,
}
