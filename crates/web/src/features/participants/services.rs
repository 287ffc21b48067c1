use raffle_storage::{
    dto::participant::CreateParticipantRequest, error::Result, models::Participant,
    repository::ParticipantStore,
};

/// List all participants
pub async fn list_participants(store: &dyn ParticipantStore) -> Result<Vec<Participant>> {
    store.list().await
}

/// Get participant by id
pub async fn get_participant(store: &dyn ParticipantStore, id: i64) -> Result<Participant> {
    store.find_by_id(id).await
}

/// Create a new participant
pub async fn create_participant(
    store: &dyn ParticipantStore,
    request: &CreateParticipantRequest,
) -> Result<Participant> {
    let participant = store.insert(request).await?;
    tracing::info!(participant_id = participant.id, "Participant created");

    Ok(participant)
}

/// Delete a participant
pub async fn delete_participant(store: &dyn ParticipantStore, id: i64) -> Result<()> {
    store.delete(id).await?;
    tracing::info!(participant_id = id, "Participant deleted");

    Ok(())
}
