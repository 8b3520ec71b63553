//! Integration tests for `SqliteStore` against a database file in a temp dir.

use chrono::NaiveDate;
use gts_core::{
  institute::NewInstitute,
  person::NewPerson,
  search::{SearchMode, SearchQuery},
  store::CatalogStore,
  thesis::NewThesis,
  university::NewUniversity,
};
use tempfile::TempDir;

use crate::{DatabaseConfig, SqliteStore};

/// The `TempDir` must outlive the store.
async fn store() -> (TempDir, SqliteStore) {
  let dir = tempfile::tempdir().expect("temp dir");
  let config = DatabaseConfig {
    name: "gts_test".into(),
    dir:  dir.path().to_path_buf(),
  };
  let store = SqliteStore::open(&config).await.expect("store");
  (dir, store)
}

/// Count rows with a side connection, bypassing the store.
fn count(dir: &TempDir, sql: &str) -> i64 {
  let conn = rusqlite::Connection::open(dir.path().join("gts_test.sqlite3")).unwrap();
  conn.query_row(sql, [], |row| row.get(0)).unwrap()
}

fn person(first: &str, second: &str) -> NewPerson {
  NewPerson {
    first_name:   first.into(),
    second_name:  second.into(),
    phone_number: None,
  }
}

struct Seed {
  author:     i64,
  university: i64,
  institute:  i64,
}

async fn seed(s: &SqliteStore) -> Seed {
  let author = s.create_person(person("Ada", "Lovelace")).await.unwrap();
  let university = s
    .create_university(NewUniversity {
      university_name: "Middle East Technical University".into(),
      location:        "Ankara".into(),
    })
    .await
    .unwrap();
  let institute = s
    .create_institute(NewInstitute {
      institute_name: "Informatics Institute".into(),
      university_id:  university,
    })
    .await
    .unwrap();
  Seed { author, university, institute }
}

fn thesis(seed: &Seed, title: &str, topics: &[&str], keywords: &[&str]) -> NewThesis {
  NewThesis {
    title:           title.into(),
    r#abstract:      format!("Abstract of {title}"),
    author_id:       seed.author,
    thesis_year:     NaiveDate::from_ymd_opt(2021, 1, 1),
    thesis_type:     "Master".into(),
    university_id:   seed.university,
    institute_id:    seed.institute,
    page_count:      Some(120),
    language:        "English".into(),
    submission_date: Some("2021-06-30".into()),
    topics:          topics.iter().map(|t| t.to_string()).collect(),
    keywords:        keywords.iter().map(|k| k.to_string()).collect(),
  }
}

fn sorted(mut v: Vec<String>) -> Vec<String> {
  v.sort();
  v
}

// ─── Health ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn ping_and_name() {
  let (_dir, s) = store().await;
  assert_eq!(s.ping().await.unwrap(), 1);
  assert_eq!(s.database_name(), "gts_test");
}

// ─── Persons ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_and_get_person() {
  let (_dir, s) = store().await;
  let id = s
    .create_person(NewPerson {
      phone_number: Some("+90 312 000 00 00".into()),
      ..person("Grace", "Hopper")
    })
    .await
    .unwrap();

  let fetched = s.get_person(id).await.unwrap().unwrap();
  assert_eq!(fetched.id, id);
  assert_eq!(fetched.first_name, "Grace");
  assert_eq!(fetched.second_name, "Hopper");
  assert_eq!(fetched.phone_number.as_deref(), Some("+90 312 000 00 00"));
}

#[tokio::test]
async fn get_person_missing_returns_none() {
  let (_dir, s) = store().await;
  assert!(s.get_person(42).await.unwrap().is_none());
}

#[tokio::test]
async fn list_persons_ordered_by_id() {
  let (_dir, s) = store().await;
  let a = s.create_person(person("B", "Second")).await.unwrap();
  let b = s.create_person(person("A", "First")).await.unwrap();

  let ids: Vec<i64> = s.list_persons().await.unwrap().iter().map(|p| p.id).collect();
  assert_eq!(ids, vec![a, b]);
}

#[tokio::test]
async fn update_person_overwrites_every_field() {
  let (_dir, s) = store().await;
  let id = s
    .create_person(NewPerson {
      phone_number: Some("123".into()),
      ..person("Ada", "Byron")
    })
    .await
    .unwrap();

  assert!(s.update_person(id, person("Ada", "Lovelace")).await.unwrap());

  let fetched = s.get_person(id).await.unwrap().unwrap();
  assert_eq!(fetched.second_name, "Lovelace");
  assert_eq!(fetched.phone_number, None);
}

#[tokio::test]
async fn update_missing_person_creates_nothing() {
  let (dir, s) = store().await;
  assert!(!s.update_person(7, person("No", "One")).await.unwrap());
  assert_eq!(count(&dir, "SELECT COUNT(*) FROM person"), 0);
}

#[tokio::test]
async fn delete_person() {
  let (_dir, s) = store().await;
  let id = s.create_person(person("Ada", "Lovelace")).await.unwrap();

  assert!(s.delete_person(id).await.unwrap());
  assert!(!s.delete_person(id).await.unwrap());
  assert!(s.get_person(id).await.unwrap().is_none());
}

#[tokio::test]
async fn delete_referenced_person_fails() {
  let (_dir, s) = store().await;
  let seed = seed(&s).await;
  s.create_thesis(thesis(&seed, "Bound", &[], &[])).await.unwrap();

  let err = s.delete_person(seed.author).await.unwrap_err();
  assert!(err.to_string().contains("FOREIGN KEY"), "{err}");
  assert!(s.get_person(seed.author).await.unwrap().is_some());
}

// ─── Universities & institutes ───────────────────────────────────────────────

#[tokio::test]
async fn university_round_trip_and_update() {
  let (_dir, s) = store().await;
  let id = s
    .create_university(NewUniversity {
      university_name: "Bogazici".into(),
      location:        "Istanbul".into(),
    })
    .await
    .unwrap();

  assert!(
    s.update_university(id, NewUniversity {
      university_name: "Bogazici University".into(),
      location:        "Istanbul".into(),
    })
    .await
    .unwrap()
  );

  let fetched = s.get_university(id).await.unwrap().unwrap();
  assert_eq!(fetched.university_name, "Bogazici University");
  assert_eq!(fetched.location, "Istanbul");
  assert_eq!(s.list_universities().await.unwrap().len(), 1);
}

#[tokio::test]
async fn institute_requires_existing_university() {
  let (dir, s) = store().await;
  let result = s
    .create_institute(NewInstitute {
      institute_name: "Orphan".into(),
      university_id:  99,
    })
    .await;
  assert!(result.is_err());
  assert_eq!(count(&dir, "SELECT COUNT(*) FROM institute"), 0);
}

#[tokio::test]
async fn institute_reads_join_university_name() {
  let (_dir, s) = store().await;
  let seed = seed(&s).await;

  let listed = s.list_institutes().await.unwrap();
  assert_eq!(listed.len(), 1);
  assert_eq!(
    listed[0].university_name.as_deref(),
    Some("Middle East Technical University")
  );

  let detail = s.get_institute(seed.institute).await.unwrap().unwrap();
  assert_eq!(detail.university_id, seed.university);
  assert!(detail.university_name.is_some());

  let children = s.university_institutes(seed.university).await.unwrap();
  assert_eq!(children.len(), 1);
  assert_eq!(children[0].id, seed.institute);
  assert!(children[0].university_name.is_none());
}

#[tokio::test]
async fn update_and_delete_missing_institute() {
  let (_dir, s) = store().await;
  let seed = seed(&s).await;
  let body = NewInstitute {
    institute_name: "Ghost".into(),
    university_id:  seed.university,
  };
  assert!(!s.update_institute(1234, body).await.unwrap());
  assert!(!s.delete_institute(1234).await.unwrap());
  assert!(!s.delete_university(1234).await.unwrap());
}

// ─── Theses ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn thesis_detail_round_trip() {
  let (_dir, s) = store().await;
  let seed = seed(&s).await;
  let id = s
    .create_thesis(thesis(&seed, "Deep Learning Basics", &["AI", "ML"], &["nlp"]))
    .await
    .unwrap();

  let detail = s.get_thesis(id).await.unwrap().unwrap();
  assert_eq!(detail.id, id);
  assert_eq!(detail.title, "Deep Learning Basics");
  assert_eq!(detail.r#abstract, "Abstract of Deep Learning Basics");
  assert_eq!(detail.author_id, seed.author);
  assert_eq!(detail.author_name, "Ada Lovelace");
  assert_eq!(detail.thesis_year, Some(2021));
  assert_eq!(detail.university_name, "Middle East Technical University");
  assert_eq!(detail.institute_name, "Informatics Institute");
  assert_eq!(detail.page_count, Some(120));
  assert_eq!(detail.submission_date, NaiveDate::from_ymd_opt(2021, 6, 30));
  assert_eq!(sorted(detail.topics), vec!["AI", "ML"]);
  assert_eq!(detail.keywords, vec!["nlp"]);
}

#[tokio::test]
async fn thesis_without_tags_or_year() {
  let (_dir, s) = store().await;
  let seed = seed(&s).await;
  let id = s
    .create_thesis(NewThesis {
      thesis_year: None,
      submission_date: None,
      page_count: None,
      ..thesis(&seed, "Bare", &[], &[])
    })
    .await
    .unwrap();

  let detail = s.get_thesis(id).await.unwrap().unwrap();
  assert!(detail.topics.is_empty());
  assert!(detail.keywords.is_empty());
  assert_eq!(detail.thesis_year, None);
  assert_eq!(detail.submission_date, None);
  assert_eq!(detail.page_count, None);
}

#[tokio::test]
async fn duplicate_tags_collapse_on_read() {
  let (dir, s) = store().await;
  let seed = seed(&s).await;
  let id = s
    .create_thesis(thesis(&seed, "Dupes", &["AI", "AI", "ML"], &["x", "x"]))
    .await
    .unwrap();

  assert_eq!(count(&dir, "SELECT COUNT(*) FROM topic"), 3);

  let detail = s.get_thesis(id).await.unwrap().unwrap();
  assert_eq!(sorted(detail.topics), vec!["AI", "ML"]);
  assert_eq!(detail.keywords, vec!["x"]);
}

#[tokio::test]
async fn get_thesis_missing_returns_none() {
  let (_dir, s) = store().await;
  assert!(s.get_thesis(1).await.unwrap().is_none());
}

#[tokio::test]
async fn create_thesis_rolls_back_on_failure() {
  let (dir, s) = store().await;
  let seed = seed(&s).await;
  let bad = NewThesis {
    author_id: 999,
    ..thesis(&seed, "Dangling", &["AI"], &["nlp"])
  };

  assert!(s.create_thesis(bad).await.is_err());
  assert_eq!(count(&dir, "SELECT COUNT(*) FROM thesis"), 0);
  assert_eq!(count(&dir, "SELECT COUNT(*) FROM topic"), 0);
  assert_eq!(count(&dir, "SELECT COUNT(*) FROM keyword"), 0);
}

#[tokio::test]
async fn malformed_submission_date_is_rejected() {
  let (dir, s) = store().await;
  let seed = seed(&s).await;
  let bad = NewThesis {
    submission_date: Some("30/06/2021".into()),
    ..thesis(&seed, "Dated", &[], &[])
  };

  assert!(s.create_thesis(bad).await.is_err());
  assert_eq!(count(&dir, "SELECT COUNT(*) FROM thesis"), 0);
}

#[tokio::test]
async fn update_thesis_replaces_tags() {
  let (dir, s) = store().await;
  let seed = seed(&s).await;
  let id = s
    .create_thesis(thesis(&seed, "Evolving", &["AI", "ML"], &["nlp"]))
    .await
    .unwrap();

  let updated = NewThesis {
    thesis_year: NaiveDate::from_ymd_opt(2022, 1, 1),
    ..thesis(&seed, "Evolved", &["Systems"], &[])
  };
  assert!(s.update_thesis(id, updated).await.unwrap());

  let detail = s.get_thesis(id).await.unwrap().unwrap();
  assert_eq!(detail.title, "Evolved");
  assert_eq!(detail.thesis_year, Some(2022));
  assert_eq!(detail.topics, vec!["Systems"]);
  assert!(detail.keywords.is_empty());
  assert_eq!(count(&dir, "SELECT COUNT(*) FROM topic"), 1);
}

#[tokio::test]
async fn update_missing_thesis_touches_no_tags() {
  let (dir, s) = store().await;
  let seed = seed(&s).await;
  let id = s
    .create_thesis(thesis(&seed, "Existing", &["AI"], &["nlp"]))
    .await
    .unwrap();

  let missing = id + 100;
  assert!(
    !s.update_thesis(missing, thesis(&seed, "Ghost", &["New"], &["new"]))
      .await
      .unwrap()
  );

  assert_eq!(count(&dir, "SELECT COUNT(*) FROM topic"), 1);
  assert_eq!(count(&dir, "SELECT COUNT(*) FROM keyword"), 1);
  assert_eq!(count(&dir, "SELECT COUNT(*) FROM thesis"), 1);
}

#[tokio::test]
async fn failed_thesis_update_keeps_previous_tags() {
  let (_dir, s) = store().await;
  let seed = seed(&s).await;
  let id = s
    .create_thesis(thesis(&seed, "Stable", &["AI"], &["nlp"]))
    .await
    .unwrap();

  let bad = NewThesis {
    institute_id: 999,
    ..thesis(&seed, "Broken", &["Other"], &[])
  };
  assert!(s.update_thesis(id, bad).await.is_err());

  let detail = s.get_thesis(id).await.unwrap().unwrap();
  assert_eq!(detail.title, "Stable");
  assert_eq!(detail.topics, vec!["AI"]);
  assert_eq!(detail.keywords, vec!["nlp"]);
}

#[tokio::test]
async fn delete_thesis_removes_tags() {
  let (dir, s) = store().await;
  let seed = seed(&s).await;
  let id = s
    .create_thesis(thesis(&seed, "Doomed", &["AI", "ML"], &["nlp"]))
    .await
    .unwrap();

  assert!(s.delete_thesis(id).await.unwrap());
  assert!(s.get_thesis(id).await.unwrap().is_none());
  assert_eq!(count(&dir, "SELECT COUNT(*) FROM topic"), 0);
  assert_eq!(count(&dir, "SELECT COUNT(*) FROM keyword"), 0);

  assert!(!s.delete_thesis(id).await.unwrap());
}

#[tokio::test]
async fn list_and_relationship_reads() {
  let (_dir, s) = store().await;
  let seed = seed(&s).await;
  let first = s.create_thesis(thesis(&seed, "First", &[], &[])).await.unwrap();
  let second = s.create_thesis(thesis(&seed, "Second", &[], &[])).await.unwrap();

  let listed = s.list_theses().await.unwrap();
  assert_eq!(listed.iter().map(|t| t.th_num).collect::<Vec<_>>(), vec![first, second]);
  assert_eq!(listed[0].author, "Ada Lovelace");
  assert_eq!(listed[0].th_year, Some(2021));

  let by_person = s.person_theses(seed.author).await.unwrap();
  assert_eq!(by_person.len(), 2);
  assert_eq!(by_person[0].page_count, Some(120));

  let by_uni = s.university_theses(seed.university).await.unwrap();
  assert_eq!(by_uni.iter().map(|t| t.id).collect::<Vec<_>>(), vec![first, second]);

  let by_ins = s.institute_theses(seed.institute).await.unwrap();
  assert_eq!(by_ins[1].summary.title, "Second");

  assert!(s.person_theses(seed.author + 50).await.unwrap().is_empty());
}

#[tokio::test]
async fn catalog_rows_carry_full_year_date() {
  let (_dir, s) = store().await;
  let seed = seed(&s).await;
  s.create_thesis(thesis(&seed, "Catalogued", &[], &[])).await.unwrap();

  let rows = s.catalog_rows().await.unwrap();
  assert_eq!(rows.len(), 1);
  assert_eq!(rows[0].th_year, NaiveDate::from_ymd_opt(2021, 1, 1));
  assert_eq!(rows[0].author_name, "Ada Lovelace");
  assert_eq!(rows[0].th_language, "English");
}

// ─── Search ──────────────────────────────────────────────────────────────────

fn query(keyword: &str, mode: SearchMode) -> SearchQuery {
  SearchQuery {
    keyword: keyword.into(),
    mode,
  }
}

#[tokio::test]
async fn free_text_search_is_case_insensitive() {
  let (_dir, s) = store().await;
  let seed = seed(&s).await;
  let deep = s
    .create_thesis(thesis(&seed, "Deep Learning Basics", &[], &[]))
    .await
    .unwrap();
  s.create_thesis(thesis(&seed, "Shallow Parsing", &[], &[])).await.unwrap();

  let hits = s.search(&query("deep", SearchMode::FreeText)).await.unwrap();
  assert_eq!(hits.len(), 1);
  assert_eq!(hits[0].th_num, deep);
}

#[tokio::test]
async fn free_text_search_matches_abstract() {
  let (_dir, s) = store().await;
  let seed = seed(&s).await;
  s.create_thesis(thesis(&seed, "Untitled", &[], &[])).await.unwrap();

  let hits = s.search(&query("ABSTRACT OF", SearchMode::FreeText)).await.unwrap();
  assert_eq!(hits.len(), 1);
}

#[tokio::test]
async fn topic_search_returns_distinct_theses() {
  let (_dir, s) = store().await;
  let seed = seed(&s).await;
  let a = s
    .create_thesis(thesis(&seed, "A", &["Machine Learning", "Deep Learning"], &[]))
    .await
    .unwrap();
  let b = s
    .create_thesis(thesis(&seed, "B", &["Reinforcement learning"], &[]))
    .await
    .unwrap();
  s.create_thesis(thesis(&seed, "C", &["Databases"], &["learning"])).await.unwrap();

  let hits = s.search(&query("learning", SearchMode::Topic)).await.unwrap();
  assert_eq!(hits.iter().map(|t| t.th_num).collect::<Vec<_>>(), vec![a, b]);
}

#[tokio::test]
async fn keyword_search_returns_distinct_theses() {
  let (_dir, s) = store().await;
  let seed = seed(&s).await;
  let a = s
    .create_thesis(thesis(&seed, "A", &[], &["nlp", "NLP pipelines"]))
    .await
    .unwrap();
  s.create_thesis(thesis(&seed, "B", &["nlp"], &["vision"])).await.unwrap();

  let hits = s.search(&query("nlp", SearchMode::Keyword)).await.unwrap();
  assert_eq!(hits.len(), 1);
  assert_eq!(hits[0].th_num, a);
}

#[tokio::test]
async fn search_folds_non_ascii_case() {
  let (_dir, s) = store().await;
  let seed = seed(&s).await;
  let id = s
    .create_thesis(thesis(&seed, "Derin Öğrenme Temelleri", &["Öğrenme"], &["Çeviri"]))
    .await
    .unwrap();

  let free = s.search(&query("öğrenme", SearchMode::FreeText)).await.unwrap();
  let topic = s.search(&query("öğrenme", SearchMode::Topic)).await.unwrap();
  let keyword = s.search(&query("çeviri", SearchMode::Keyword)).await.unwrap();
  assert_eq!((free.len(), topic.len(), keyword.len()), (1, 1, 1));
  assert_eq!(free[0].th_num, id);

  let upper = s.search(&query("ÖĞRENME TEMEL", SearchMode::FreeText)).await.unwrap();
  assert_eq!(upper.len(), 1);
}

#[tokio::test]
async fn empty_keyword_matches_everything() {
  let (_dir, s) = store().await;
  let seed = seed(&s).await;
  s.create_thesis(thesis(&seed, "One", &[], &[])).await.unwrap();
  s.create_thesis(thesis(&seed, "Two", &[], &[])).await.unwrap();

  let hits = s.search(&SearchQuery::default()).await.unwrap();
  assert_eq!(hits.len(), 2);
}
