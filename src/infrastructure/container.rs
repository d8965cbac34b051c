use std::sync::Arc;

use crate::{
    application::{
        ports::{EmbeddingProvider, LanguageModel},
        services::{
            ExtractionService, FhirService, QuestionAnsweringService, RecursiveCharacterSplitter,
            SummarizationService, VectorStoreService,
        },
        use_cases::{
            CreateDocumentUseCase, DeleteDocumentUseCase, GetDocumentChunksUseCase,
            GetDocumentUseCase, ListDocumentsUseCase, ReindexDocumentsUseCase,
            UpdateDocumentUseCase,
        },
    },
    domain::repositories::{ChunkRepository, DocumentRepository},
    infrastructure::{
        config::Settings,
        database::{
            DbPool,
            repositories::{PgVectorChunkRepository, PostgresDocumentRepository},
        },
        external_services::{
            AzureOpenAIChatProvider, AzureOpenAIClient, AzureOpenAIEmbeddingProvider,
        },
    },
    presentation::http::{
        handlers::{DocumentHandler, ExtractionHandler, FhirHandler, MedicalHandler, QaHandler},
        middleware::ApiKey,
        server::HttpServer,
    },
};

pub struct AppContainer {
    pub document_handler: Arc<DocumentHandler>,
    pub extraction_handler: Arc<ExtractionHandler>,
    pub fhir_handler: Arc<FhirHandler>,
    pub medical_handler: Arc<MedicalHandler>,
    pub qa_handler: Arc<QaHandler>,
}

impl AppContainer {
    /// Wires the Postgres repositories and Azure OpenAI providers.
    pub fn new(settings: &Settings, db_pool: DbPool) -> Result<Self, Box<dyn std::error::Error>> {
        // Create repositories
        let document_repository: Arc<dyn DocumentRepository> =
            Arc::new(PostgresDocumentRepository::new(db_pool.clone()));
        let chunk_repository: Arc<dyn ChunkRepository> =
            Arc::new(PgVectorChunkRepository::new(db_pool));

        // Create external services
        let embedding_provider: Arc<dyn EmbeddingProvider> = Arc::new(
            AzureOpenAIEmbeddingProvider::new(AzureOpenAIClient::new(settings.embeddings.clone())?),
        );
        let language_model: Arc<dyn LanguageModel> = Arc::new(AzureOpenAIChatProvider::new(
            AzureOpenAIClient::new(settings.chat.clone())?,
        ));

        tracing::info!(
            "Using chat model {} and embedding model {}",
            language_model.model_info(),
            embedding_provider.model_info()
        );

        Ok(Self::from_components(
            document_repository,
            chunk_repository,
            embedding_provider,
            language_model,
        ))
    }

    pub fn from_components(
        document_repository: Arc<dyn DocumentRepository>,
        chunk_repository: Arc<dyn ChunkRepository>,
        embedding_provider: Arc<dyn EmbeddingProvider>,
        language_model: Arc<dyn LanguageModel>,
    ) -> Self {
        // Create application services
        let vector_store = Arc::new(VectorStoreService::new(
            chunk_repository,
            embedding_provider,
            Arc::new(RecursiveCharacterSplitter::default()),
        ));
        let extraction_service = Arc::new(ExtractionService::new(language_model.clone()));
        let fhir_service = Arc::new(FhirService::new(language_model.clone()));
        let question_answering_service = Arc::new(QuestionAnsweringService::new(
            vector_store.clone(),
            language_model.clone(),
        ));
        let summarization_service = Arc::new(SummarizationService::new(language_model));

        // Create use cases
        let list_documents_use_case =
            Arc::new(ListDocumentsUseCase::new(document_repository.clone()));
        let get_document_use_case = Arc::new(GetDocumentUseCase::new(document_repository.clone()));
        let create_document_use_case = Arc::new(CreateDocumentUseCase::new(
            document_repository.clone(),
            vector_store.clone(),
        ));
        let update_document_use_case = Arc::new(UpdateDocumentUseCase::new(
            document_repository.clone(),
            vector_store.clone(),
        ));
        let delete_document_use_case = Arc::new(DeleteDocumentUseCase::new(
            document_repository.clone(),
            vector_store.clone(),
        ));
        let get_document_chunks_use_case = Arc::new(GetDocumentChunksUseCase::new(
            document_repository.clone(),
            vector_store.clone(),
        ));
        let reindex_documents_use_case = Arc::new(ReindexDocumentsUseCase::new(
            document_repository,
            vector_store,
        ));

        // Create HTTP handlers
        let document_handler = Arc::new(DocumentHandler::new(
            list_documents_use_case,
            get_document_use_case,
            create_document_use_case,
            update_document_use_case,
            delete_document_use_case,
            get_document_chunks_use_case,
            reindex_documents_use_case,
        ));

        Self {
            document_handler,
            extraction_handler: Arc::new(ExtractionHandler::new(extraction_service)),
            fhir_handler: Arc::new(FhirHandler::new(fhir_service)),
            medical_handler: Arc::new(MedicalHandler::new(summarization_service)),
            qa_handler: Arc::new(QaHandler::new(question_answering_service)),
        }
    }

    pub fn http_server(&self, api_key: ApiKey, app_name: String, port: Option<u16>) -> HttpServer {
        HttpServer::new(
            self.document_handler.clone(),
            self.extraction_handler.clone(),
            self.fhir_handler.clone(),
            self.medical_handler.clone(),
            self.qa_handler.clone(),
            api_key,
            app_name,
            port,
        )
    }
}
