use salamanca::domain::Embedding;

#[test]
fn given_identical_vectors_when_computing_similarity_then_returns_one() {
    let a = Embedding::new(vec![0.6, 0.8]);
    let b = Embedding::new(vec![0.6, 0.8]);

    assert!((a.cosine_similarity(&b) - 1.0).abs() < 1e-6);
}

#[test]
fn given_orthogonal_vectors_when_computing_similarity_then_returns_zero() {
    let a = Embedding::new(vec![1.0, 0.0]);
    let b = Embedding::new(vec![0.0, 1.0]);

    assert!(a.cosine_similarity(&b).abs() < 1e-6);
}

#[test]
fn given_opposite_vectors_when_computing_similarity_then_returns_minus_one() {
    let a = Embedding::new(vec![1.0, 0.0]);
    let b = Embedding::new(vec![-1.0, 0.0]);

    assert!((a.cosine_similarity(&b) + 1.0).abs() < 1e-6);
}

#[test]
fn given_mismatched_dimensions_when_computing_similarity_then_returns_zero() {
    let a = Embedding::new(vec![1.0, 0.0]);
    let b = Embedding::new(vec![1.0, 0.0, 0.0]);

    assert_eq!(a.cosine_similarity(&b), 0.0);
}

#[test]
fn given_zero_vector_when_computing_similarity_then_returns_zero() {
    let a = Embedding::new(vec![0.0, 0.0]);
    let b = Embedding::new(vec![1.0, 0.0]);

    assert_eq!(a.cosine_similarity(&b), 0.0);
}

#[test]
fn given_vector_when_asking_dimensions_then_returns_length() {
    let embedding = Embedding::new(vec![0.1; 768]);

    assert_eq!(embedding.dimensions(), 768);
}
