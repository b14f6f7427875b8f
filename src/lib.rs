pub mod core;
pub mod index;
pub mod query;
pub mod loader;
pub mod snapshot;
pub mod catalog;
pub mod api;

/*
┌──────────────────────────────────────────────────────────────────────────────┐
│                          ASSETDEX STRUCT ARCHITECTURE                         │
└──────────────────────────────────────────────────────────────────────────────┘

┌──────────────────────────────── CATALOG LAYER ───────────────────────────────┐
│  struct Catalog                                                              │
│  • products: BTreeMap<slug, Arc<ProductIndex>>                               │
│  • resolver: ProductResolver        // Host subdomain / path segment → slug  │
│                                                                              │
│  struct ProductIndex                     struct ReloadWatcher                │
│  • source: ListingSource                 • tokio task polling the listing    │
│  • policy: LoadPolicy                    • calls ProductIndex::reload()      │
│  • categories: Arc<CategoryRegistry>                                         │
│  • snapshots: SnapshotController                                             │
│  • reload_lock: Mutex<()>               // single writer                     │
└──────────────────────────────────────────────────────────────────────────────┘

┌─────────────────────────────── SNAPSHOT LAYER ───────────────────────────────┐
│  struct SnapshotController               struct IndexSnapshot                │
│  • current: RwLock<Option<Arc<..>>>      • version / loaded_at / checksum    │
│  • next_version: AtomicU64               • engine: QueryEngine               │
│                                                                              │
│  reload = build a new IndexSnapshot, swap the Arc; readers keep theirs       │
└──────────────────────────────────────────────────────────────────────────────┘

┌──────────────────────────────── QUERY LAYER ─────────────────────────────────┐
│  struct QueryEngine                                                          │
│  • index: PathIndex                                                          │
│  • cache: PrefixCache               // prefix → Arc<[PathEntry]>, per gen    │
│  • categories: Arc<CategoryRegistry>                                         │
│                                                                              │
│  page · filter_by_prefix · filter_by_directory · directory_structure ·       │
│  search · files_by_category · paginated_category                             │
└──────────────────────────────────────────────────────────────────────────────┘

┌──────────────────────────────── INDEX LAYER ─────────────────────────────────┐
│  struct PathIndex                                                            │
│  • entries: Vec<PathEntry>          // byte-wise sorted, unique              │
│  • folded: Vec<String>              // lowercased, same positions            │
│                                                                              │
│  prefix_range(P) = two binary searches over one contiguous run               │
└──────────────────────────────────────────────────────────────────────────────┘

┌──────────────────────────────── LOADER LAYER ────────────────────────────────┐
│  ListingLayout → ListingSource::read() → RawListing { data, checksum }       │
│                → parse_listing (text lines | JSON array) → build_index       │
└──────────────────────────────────────────────────────────────────────────────┘

┌───────────────────────────────── API LAYER ──────────────────────────────────┐
│  struct FileListService             // caps page sizes, builds URLs,         │
│  • catalog: Arc<Catalog>            // rejects empty keywords                │
│  • config: ApiConfig                                                         │
│  render_directory_listing()         // HTML directory page                   │
└──────────────────────────────────────────────────────────────────────────────┘
*/
