pub mod core;
pub mod analysis;
pub mod index;
pub mod query;
pub mod search;
pub mod protocol;

/*
┌──────────────────────────────────────────────────────────────────────────────────────┐
│                             PAPERDEX STRUCT ARCHITECTURE                              │
└──────────────────────────────────────────────────────────────────────────────────────┘

┌───────────────────────────────────── PROTOCOL LAYER ─────────────────────────────────┐
│                                                                                       │
│  ┌──────────────────────────────┐      ┌──────────────────────────────────────────┐   │
│  │ struct SearchWorker          │      │ enum Request          enum Response      │   │
│  │ • requests: Sender<Request>  │ ───► │ • UpdatePapers        • PapersUpdated    │   │
│  │ • responses: Receiver<Resp>  │ ◄─── │ • Search              • SearchResult     │   │
│  │ • handle: JoinHandle         │      │ • ClearCache          • CacheCleared     │   │
│  └──────────────────────────────┘      │ • GetStats            • StatsResult      │   │
│        one thread, one engine,         │ • Unknown             • Error            │   │
│        run-to-completion               └──────────────────────────────────────────┘   │
└───────────────────────────────────────────────────────────────────────────────────────┘

┌─────────────────────────────────────── CORE LAYER ───────────────────────────────────┐
│                                                                                       │
│  ┌─────────────────────────────────────────────────────────────────────────────┐     │
│  │                             struct SearchEngine                              │     │
│  │ config: EngineConfig             // Batch size, prefix range, cache limits   │     │
│  │ builder: IndexBuilder            // Snapshot → PaperIndex                    │     │
│  │ executor: QueryExecutor          // Filters, keyword matching                │     │
│  │ index: Option<PaperIndex>        // None until the first snapshot            │     │
│  │ cache: ResultCache               // Signature → unsorted results             │     │
│  │ stats: EngineStats               // Searches, hits, build time               │     │
│  └─────────────────────────────────────────────────────────────────────────────┘     │
│                                                                                       │
│  ┌──────────────────┐  ┌────────────────────────┐  ┌──────────────────────────┐      │
│  │ struct Record    │  │ struct NormalizedRecord│  │ struct Error             │      │
│  │ • id, title      │  │ • record: Record       │  │ • kind: ErrorKind        │      │
│  │ • abstract_text  │  │ • title_lower          │  │ • context: String        │      │
│  │ • conference     │  │ • abstract_lower       │  └──────────────────────────┘      │
│  │ • year, order    │  │ • conference_lower     │                                    │
│  │ • extra: Map     │  │ • year_num: i64        │                                    │
│  └──────────────────┘  └────────────────────────┘                                    │
└───────────────────────────────────────────────────────────────────────────────────────┘

┌──────────────────────────────────── INDEXING LAYER ──────────────────────────────────┐
│                                                                                       │
│  ┌─────────────────────────────────────────────────────────────────────────────┐     │
│  │                              struct PaperIndex                               │     │
│  │ records: Vec<Arc<NormalizedRecord>>         // Position = DocId              │     │
│  │ title_postings: PostingsTable<String>       // Term / prefix → docs          │     │
│  │ abstract_postings: PostingsTable<String>    // Term / prefix → docs          │     │
│  │ conference_postings: PostingsTable<String>  // Raw label → docs              │     │
│  │ year_postings: PostingsTable<i64>           // Parsed year → docs            │     │
│  └─────────────────────────────────────────────────────────────────────────────┘     │
│                                                                                       │
│  ┌──────────────────────────┐  ┌─────────────────────────────────────────────┐       │
│  │ struct Analyzer          │  │ WordTokenizer → MinLengthFilter             │       │
│  │ • tokenizer: Box<dyn ..> │  │              → StopWordFilter               │       │
│  │ • filters: Vec<Box<..>>  │  │              → EdgePrefixFilter (3..=6)     │       │
│  └──────────────────────────┘  └─────────────────────────────────────────────┘       │
└───────────────────────────────────────────────────────────────────────────────────────┘

┌───────────────────────────────────── SEARCH LAYER ───────────────────────────────────┐
│                                                                                       │
│   SearchQuery ──► conferences ──► years ──► title keywords ──► abstract keywords      │
│                   (intersect)    (range)   (KeywordMatcher: dictionary, else scan)    │
│                                                                                       │
│   candidates ──► ResultCache ──► ResultSorter (key + direction, fixed tie-break)      │
└───────────────────────────────────────────────────────────────────────────────────────┘
*/
