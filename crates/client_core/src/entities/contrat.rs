use shared::{domain::ContratId, protocol::Contrat};

use crate::{
    error::ClientResult,
    session::Session,
    transport::{ApiPath, RestClient},
};

pub fn contrat_path(id: &ContratId) -> ApiPath {
    ApiPath::new("/api/contrats").join(id)
}

pub fn update_pdf_path(id: &ContratId) -> ApiPath {
    contrat_path(id).join("update-pdf")
}

pub async fn fetch_contrat(
    client: &RestClient,
    session: &Session,
    id: &ContratId,
) -> ClientResult<Contrat> {
    client.get_json(session, contrat_path(id)).await
}
