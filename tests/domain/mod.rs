mod embedding_test;
mod ids_test;
