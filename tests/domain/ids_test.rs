use salamanca::domain::{ChunkId, Embedding, QuestionId, Room, RoomId, TranscriptChunk};

#[test]
fn given_two_room_ids_when_generated_then_are_unique() {
    let id1 = RoomId::new();
    let id2 = RoomId::new();
    assert_ne!(id1, id2);
}

#[test]
fn given_two_chunk_ids_when_generated_then_are_unique() {
    let id1 = ChunkId::new();
    let id2 = ChunkId::new();
    assert_ne!(id1, id2);
}

#[test]
fn given_two_question_ids_when_generated_then_are_unique() {
    let id1 = QuestionId::new();
    let id2 = QuestionId::new();
    assert_ne!(id1, id2);
}

#[test]
fn given_valid_params_when_creating_room_then_starts_with_empty_content() {
    let room = Room::new(None, "Biology 101".to_string(), "Cell structure".to_string());

    assert_eq!(room.name, "Biology 101");
    assert_eq!(room.description, "Cell structure");
    assert!(room.content.is_empty());
    assert_eq!(room.created_at, room.updated_at);
}

#[test]
fn given_valid_params_when_creating_chunk_then_assigns_new_id() {
    let room_id = RoomId::new();
    let chunk = TranscriptChunk::new(
        room_id,
        "the mitochondria is the powerhouse of the cell".to_string(),
        Embedding::new(vec![0.1; 768]),
    );

    assert_eq!(chunk.room_id, room_id);
    assert_eq!(chunk.embedding.dimensions(), 768);
}
