//! SQL schema for the thesis catalog.
//!
//! Executed once at startup. Foreign-key enforcement is per connection and
//! is switched on by the store whenever it connects.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS person (
    per_id      INTEGER PRIMARY KEY AUTOINCREMENT,
    first_name  TEXT NOT NULL,
    second_name TEXT NOT NULL,
    phone_num   TEXT
);

CREATE TABLE IF NOT EXISTS university (
    uni_id       INTEGER PRIMARY KEY AUTOINCREMENT,
    uni_name     TEXT NOT NULL,
    uni_location TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS institute (
    ins_id   INTEGER PRIMARY KEY AUTOINCREMENT,
    ins_name TEXT NOT NULL,
    uni_id   INTEGER NOT NULL REFERENCES university(uni_id)
);

-- th_year is always January 1st of the thesis year.
-- Both date columns must hold canonical YYYY-MM-DD text.
CREATE TABLE IF NOT EXISTS thesis (
    th_num          INTEGER PRIMARY KEY AUTOINCREMENT,
    title           TEXT NOT NULL,
    abstract        TEXT NOT NULL,
    author_id       INTEGER NOT NULL REFERENCES person(per_id),
    th_year         TEXT CHECK (th_year IS NULL OR date(th_year) IS th_year),
    th_type         TEXT NOT NULL,
    uni_id          INTEGER NOT NULL REFERENCES university(uni_id),
    ins_id          INTEGER NOT NULL REFERENCES institute(ins_id),
    page_num        INTEGER,
    th_language     TEXT NOT NULL,
    submission_date TEXT CHECK (submission_date IS NULL OR date(submission_date) IS submission_date)
);

-- Tags have no identity of their own; duplicates are collapsed on read.
CREATE TABLE IF NOT EXISTS topic (
    th_num     INTEGER NOT NULL REFERENCES thesis(th_num),
    topic_name TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS keyword (
    th_num  INTEGER NOT NULL REFERENCES thesis(th_num),
    keyword TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS institute_uni_idx  ON institute(uni_id);
CREATE INDEX IF NOT EXISTS thesis_author_idx  ON thesis(author_id);
CREATE INDEX IF NOT EXISTS thesis_uni_idx     ON thesis(uni_id);
CREATE INDEX IF NOT EXISTS thesis_ins_idx     ON thesis(ins_id);
CREATE INDEX IF NOT EXISTS topic_thesis_idx   ON topic(th_num);
CREATE INDEX IF NOT EXISTS keyword_thesis_idx ON keyword(th_num);

PRAGMA user_version = 1;
";

