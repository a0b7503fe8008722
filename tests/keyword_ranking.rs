// tests/keyword_ranking.rs
use lyric_scrape::analysis::analyze;
use lyric_scrape::config::{AnalysisOptions, UnknownYearPolicy};
use lyric_scrape::keywords::{filter_tokens, is_keyword, KeywordTally, Tallied};
use lyric_scrape::record::{LyricRecord, YearKey};
use lyric_scrape::segment::Segmenter;

fn song(id: &str, year: Option<i32>, lyrics: &str) -> LyricRecord {
    LyricRecord {
        id: id.into(),
        title: format!("title {id}"),
        artist: "artist".into(),
        language_code: "zh".into(),
        lyrics_text: lyrics.into(),
        release_year: year,
    }
}

#[test]
fn two_songs_same_year_count_twice() {
    let records = vec![
        song("1", Some(2020), "[00:01.00]我们的爱情"),
        song("2", Some(2020), "[00:01.00]爱情 不会停"),
    ];
    let tally = analyze(&records, &Segmenter::default(), &AnalysisOptions::default());
    let counts = tally.count_for(YearKey::Year(2020)).unwrap();
    assert_eq!(counts.get("爱情"), 2);

    let rankings = tally.rankings(10);
    assert_eq!(rankings[0].year, YearKey::Year(2020));
    assert_eq!(rankings[0].entries[0].word, "爱情");
    assert_eq!(rankings[0].entries[0].frequency, 2);
}

#[test]
fn single_character_tokens_are_dropped() {
    assert_eq!(filter_tokens(["爱", "爱情", "的", "家"], 2), vec!["爱情"]);
}

#[test]
fn rankings_sorted_and_truncated() {
    let mut tally = KeywordTally::new(2, UnknownYearPolicy::Bucket, &[]);
    let words = ["alpha", "beta", "beta", "gamma", "gamma", "gamma", "delta", "delta", "delta", "delta"];
    tally.add_tokens(YearKey::Year(2001), &words);

    let r = &tally.rankings(3)[0].entries;
    assert_eq!(r.len(), 3);
    let freqs: Vec<u64> = r.iter().map(|k| k.frequency).collect();
    assert_eq!(freqs, vec![4, 3, 2]);
    assert!(freqs.windows(2).all(|w| w[0] >= w[1]));
}

#[test]
fn ties_keep_first_seen_order_across_songs() {
    let mut tally = KeywordTally::new(2, UnknownYearPolicy::Bucket, &[]);
    tally.add_tokens(YearKey::Year(2010), &["青春", "梦想"]);
    tally.add_tokens(YearKey::Year(2010), &["未来", "梦想", "青春"]);
    let words: Vec<String> = tally.rankings(5)[0].entries.iter().map(|k| k.word.clone()).collect();
    assert_eq!(words, vec!["青春", "梦想", "未来"]);
}

#[test]
fn unknown_year_bucketed_by_default() {
    let records = vec![song("1", None, "梦想"), song("2", Some(1999), "梦想")];
    let tally = analyze(&records, &Segmenter::default(), &AnalysisOptions::default());
    let years: Vec<YearKey> = tally.counts().keys().copied().collect();
    assert_eq!(years, vec![YearKey::Year(1999), YearKey::Unknown]);
    assert_eq!(tally.stats().first_year, Some(1999));
}

#[test]
fn unknown_year_dropped_under_drop_policy() {
    let opts = AnalysisOptions { unknown_year: UnknownYearPolicy::Drop, ..Default::default() };
    let mut tally = KeywordTally::new(opts.min_token_len, opts.unknown_year, &[]);
    let seg = Segmenter::default();
    assert_eq!(tally.add_record(&song("1", None, "梦想"), &seg), Tallied::UnknownYearDropped);
    assert_eq!(tally.add_record(&song("2", Some(2000), ""), &seg), Tallied::NoLyrics);
    assert_eq!(tally.add_record(&song("3", Some(2000), "的 了"), &seg), Tallied::NoKeywords);
    assert!(tally.counts().is_empty());

    let stats = tally.stats();
    assert_eq!((stats.songs_seen, stats.songs_skipped, stats.songs_tokenized), (3, 3, 0));
}

#[test]
fn every_ranked_token_obeys_the_keyword_rule() {
    let texts = [
        "[00:01.00]Yo 2pac i'm 我的梦想 是 说唱 123",
        "作词 : 某人\n爱 家 钱 rock&amp;roll 未来 x",
        "生活 就是 hip-hop 青春 a1b2 ok",
    ];
    let records: Vec<LyricRecord> = texts
        .iter()
        .enumerate()
        .map(|(i, t)| song(&i.to_string(), Some(2020 + i as i32), t))
        .collect();
    let tally = analyze(&records, &Segmenter::default(), &AnalysisOptions::default());

    let rankings = tally.rankings(usize::MAX);
    assert!(!rankings.is_empty());
    for r in rankings {
        for k in r.entries {
            assert!(is_keyword(&k.word, 2), "{} slipped through", k.word);
        }
    }
}

#[test]
fn tracked_series_by_year() {
    let opts = AnalysisOptions { tracked_keywords: vec!["梦想".into(), "外部".into()], ..Default::default() };
    let records = vec![
        song("1", Some(2019), "梦想 梦想"),
        song("2", Some(2018), "我的梦想"),
    ];
    let tally = analyze(&records, &Segmenter::default(), &opts);
    let series = tally.tracked_series();
    assert_eq!(series.get("梦想").unwrap(), &[(YearKey::Year(2018), 1), (YearKey::Year(2019), 2)]);
    assert!(series.get("外部").unwrap().is_empty());
}
