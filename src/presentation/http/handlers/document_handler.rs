use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use std::sync::Arc;

use crate::application::use_cases::{
    CreateDocumentUseCase, DeleteDocumentUseCase, GetDocumentChunksUseCase, GetDocumentUseCase,
    ListDocumentsUseCase, ReindexDocumentsUseCase, UpdateDocumentUseCase,
    create_document::{CreateDocumentError, CreateDocumentRequest},
    delete_document::{DeleteDocumentError, DeleteDocumentRequest},
    get_document::{GetDocumentError, GetDocumentRequest},
    get_document_chunks::{GetDocumentChunksError, GetDocumentChunksRequest},
    update_document::{UpdateDocumentError, UpdateDocumentRequest},
};
use crate::presentation::http::dto::{
    CreateDocumentDto, DocumentChunksResponseDto, DocumentResponseDto, UpdateDocumentDto,
    error_response,
};

pub struct DocumentHandler {
    list_documents_use_case: Arc<ListDocumentsUseCase>,
    get_document_use_case: Arc<GetDocumentUseCase>,
    create_document_use_case: Arc<CreateDocumentUseCase>,
    update_document_use_case: Arc<UpdateDocumentUseCase>,
    delete_document_use_case: Arc<DeleteDocumentUseCase>,
    get_document_chunks_use_case: Arc<GetDocumentChunksUseCase>,
    reindex_documents_use_case: Arc<ReindexDocumentsUseCase>,
}

impl DocumentHandler {
    pub fn new(
        list_documents_use_case: Arc<ListDocumentsUseCase>,
        get_document_use_case: Arc<GetDocumentUseCase>,
        create_document_use_case: Arc<CreateDocumentUseCase>,
        update_document_use_case: Arc<UpdateDocumentUseCase>,
        delete_document_use_case: Arc<DeleteDocumentUseCase>,
        get_document_chunks_use_case: Arc<GetDocumentChunksUseCase>,
        reindex_documents_use_case: Arc<ReindexDocumentsUseCase>,
    ) -> Self {
        Self {
            list_documents_use_case,
            get_document_use_case,
            create_document_use_case,
            update_document_use_case,
            delete_document_use_case,
            get_document_chunks_use_case,
            reindex_documents_use_case,
        }
    }

    pub async fn list_documents(
        State(handler): State<Arc<DocumentHandler>>,
    ) -> Result<impl IntoResponse, StatusCode> {
        match handler.list_documents_use_case.execute().await {
            Ok(response) => {
                let documents: Vec<DocumentResponseDto> = response
                    .documents
                    .into_iter()
                    .map(DocumentResponseDto::from)
                    .collect();

                Ok((StatusCode::OK, Json(documents)).into_response())
            }
            Err(e) => Ok(error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "LIST_FAILED",
                e.to_string(),
            )),
        }
    }

    pub async fn get_document(
        State(handler): State<Arc<DocumentHandler>>,
        Path(document_id): Path<i32>,
    ) -> Result<impl IntoResponse, StatusCode> {
        let request = GetDocumentRequest { document_id };

        match handler.get_document_use_case.execute(request).await {
            Ok(response) => Ok((
                StatusCode::OK,
                Json(DocumentResponseDto::from(response.document)),
            )
                .into_response()),
            Err(e @ GetDocumentError::DocumentNotFound(_)) => Ok(error_response(
                StatusCode::NOT_FOUND,
                "DOCUMENT_NOT_FOUND",
                e.to_string(),
            )),
            Err(e) => Ok(error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "FETCH_FAILED",
                e.to_string(),
            )),
        }
    }

    pub async fn create_document(
        State(handler): State<Arc<DocumentHandler>>,
        Json(body): Json<CreateDocumentDto>,
    ) -> Result<impl IntoResponse, StatusCode> {
        let request = CreateDocumentRequest {
            title: body.title,
            content: body.content,
        };

        match handler.create_document_use_case.execute(request).await {
            Ok(response) => {
                tracing::info!(
                    "Created document {} with {} chunks",
                    response.document.id(),
                    response.chunks_indexed
                );
                Ok((
                    StatusCode::CREATED,
                    Json(DocumentResponseDto::from(response.document)),
                )
                    .into_response())
            }
            Err(e @ CreateDocumentError::ValidationError(_)) => Ok(error_response(
                StatusCode::BAD_REQUEST,
                "VALIDATION_FAILED",
                e.to_string(),
            )),
            Err(e) => Ok(error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "CREATE_FAILED",
                e.to_string(),
            )),
        }
    }

    pub async fn update_document(
        State(handler): State<Arc<DocumentHandler>>,
        Path(document_id): Path<i32>,
        Json(body): Json<UpdateDocumentDto>,
    ) -> Result<impl IntoResponse, StatusCode> {
        let request = UpdateDocumentRequest {
            document_id,
            title: body.title,
            content: body.content,
        };

        match handler.update_document_use_case.execute(request).await {
            Ok(response) => Ok((
                StatusCode::OK,
                Json(DocumentResponseDto::from(response.document)),
            )
                .into_response()),
            Err(e @ UpdateDocumentError::DocumentNotFound(_)) => Ok(error_response(
                StatusCode::NOT_FOUND,
                "DOCUMENT_NOT_FOUND",
                e.to_string(),
            )),
            Err(e) => Ok(error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "UPDATE_FAILED",
                e.to_string(),
            )),
        }
    }

    pub async fn delete_document(
        State(handler): State<Arc<DocumentHandler>>,
        Path(document_id): Path<i32>,
    ) -> Result<impl IntoResponse, StatusCode> {
        let request = DeleteDocumentRequest { document_id };

        match handler.delete_document_use_case.execute(request).await {
            Ok(response) => {
                tracing::info!(
                    "Deleted document {} and {} chunks",
                    document_id,
                    response.chunks_deleted
                );
                Ok(StatusCode::NO_CONTENT.into_response())
            }
            Err(e @ DeleteDocumentError::DocumentNotFound(_)) => Ok(error_response(
                StatusCode::NOT_FOUND,
                "DOCUMENT_NOT_FOUND",
                e.to_string(),
            )),
            Err(e) => Ok(error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "DELETE_FAILED",
                e.to_string(),
            )),
        }
    }

    pub async fn get_document_chunks(
        State(handler): State<Arc<DocumentHandler>>,
        Path(document_id): Path<i32>,
    ) -> Result<impl IntoResponse, StatusCode> {
        let request = GetDocumentChunksRequest { document_id };

        match handler.get_document_chunks_use_case.execute(request).await {
            Ok(response) => Ok((
                StatusCode::OK,
                Json(DocumentChunksResponseDto::from(response)),
            )
                .into_response()),
            Err(e @ GetDocumentChunksError::DocumentNotFound(_)) => Ok(error_response(
                StatusCode::NOT_FOUND,
                "DOCUMENT_NOT_FOUND",
                e.to_string(),
            )),
            Err(e) => Ok(error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "CHUNKS_FAILED",
                e.to_string(),
            )),
        }
    }

    pub async fn reindex_documents(
        State(handler): State<Arc<DocumentHandler>>,
    ) -> Result<impl IntoResponse, StatusCode> {
        match handler.reindex_documents_use_case.execute().await {
            Ok(response) => Ok((StatusCode::OK, Json(response)).into_response()),
            Err(e) => Ok(error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "REINDEX_FAILED",
                e.to_string(),
            )),
        }
    }
}
