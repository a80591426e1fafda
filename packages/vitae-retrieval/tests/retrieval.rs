use std::collections::BTreeMap;

use vitae_config::RetrievalWeights;
use vitae_retrieval::{Lexicon, Retriever};

fn retriever(top_k: usize) -> Retriever {
	retriever_with_weights(top_k, RetrievalWeights::default())
}

fn retriever_with_weights(top_k: usize, weights: RetrievalWeights) -> Retriever {
	let lexicon = Lexicon::new(
		"aman",
		&vitae_config::default_pronouns(),
		&vitae_config::default_stop_words(),
		&vitae_config::default_synonyms(),
		weights,
	)
	.expect("Failed to build lexicon.");

	Retriever::new(lexicon, top_k)
}

#[test]
fn experience_question_about_he_finds_react_chunk_only() {
	let chunks = ["Aman has 3 years experience in React.js", "Aman likes hiking"];
	let result = retriever(3)
		.retrieve("How much experience does he have with React?", &chunks)
		.expect("Retrieval failed.");

	assert_eq!(result, ["Aman has 3 years experience in React.js"]);
}

#[test]
fn unrelated_question_returns_nothing() {
	let chunks = ["Aman has 3 years experience in React.js", "Aman likes hiking"];
	let result =
		retriever(3).retrieve("Weather forecast for Mars?", &chunks).expect("Retrieval failed.");

	assert!(result.is_empty());
}

#[test]
fn you_questions_match_the_subject() {
	let chunks = ["Hobbies: chess", "Aman Verma is a frontend engineer based in Pune"];
	let result = retriever(3).retrieve("Who are you?", &chunks).expect("Retrieval failed.");

	assert_eq!(result, ["Aman Verma is a frontend engineer based in Pune"]);
}

#[test]
fn contact_question_surfaces_email_chunk() {
	let chunks = [
		"Aman built a portfolio site with Next.js",
		"Contact Aman: email a@x.com, phone +91 12345",
		"Aman enjoys hiking",
	];
	let result = retriever(3).retrieve("What is his email?", &chunks).expect("Retrieval failed.");

	assert_eq!(result, ["Contact Aman: email a@x.com, phone +91 12345"]);
}

#[test]
fn results_never_exceed_top_k() {
	let chunks: Vec<String> = (0..20).map(|i| format!("React project number {i}")).collect();

	for top_k in [1, 3, 5] {
		let result = retriever(top_k).retrieve("react projects", &chunks).expect("Retrieval failed.");

		assert_eq!(result.len(), top_k);
	}
}

#[test]
fn equal_scores_keep_document_order() {
	let chunks = ["node one", "react two", "react three", "react four"];
	let result = retriever(2).retrieve("react", &chunks).expect("Retrieval failed.");

	assert_eq!(result, ["react two", "react three"]);
}

#[test]
fn higher_scores_rank_first() {
	let chunks = [
		"Skills: react",
		"Worked 3 years with React.js, deep React expertise",
		"Node backend",
	];
	let result =
		retriever(3).retrieve("React experience", &chunks).expect("Retrieval failed.");

	assert_eq!(result[0], "Worked 3 years with React.js, deep React expertise");
	assert_eq!(result.len(), 2);
}

#[test]
fn retrieval_is_deterministic() {
	let chunks: Vec<String> = (0..30)
		.map(|i| format!("Aman worked on project {i} using react and node at company {}", i % 4))
		.collect();
	let retriever = retriever(3);
	let first = retriever.retrieve("Which projects use node?", &chunks).expect("Retrieval failed.");

	for _ in 0..10 {
		let again =
			retriever.retrieve("Which projects use node?", &chunks).expect("Retrieval failed.");

		assert_eq!(again, first);
	}
}

#[test]
fn broad_pass_runs_when_strict_pass_is_empty() {
	let weights = RetrievalWeights { substring: 0, ..RetrievalWeights::default() };
	let retriever = retriever_with_weights(3, weights);
	let chunks = ["Aman enjoys hikingtrails on weekends", "Aman writes Rust"];
	let ranked = retriever.rank("hiking", &chunks).expect("Retrieval failed.");

	assert_eq!(ranked.pass, Some("broad"));
	assert_eq!(ranked.chunks.len(), 1);
	assert_eq!(ranked.chunks[0].index, 0);
}

#[test]
fn strict_pass_is_reported_when_it_matches() {
	let chunks = ["Aman enjoys hiking"];
	let ranked = retriever(3).rank("hiking", &chunks).expect("Retrieval failed.");

	assert_eq!(ranked.pass, Some("strict"));
}

#[test]
fn stop_word_only_question_returns_nothing() {
	let chunks = ["What is the answer? The answer is here."];
	let result = retriever(3).retrieve("What is the?", &chunks).expect("Retrieval failed.");

	assert!(result.is_empty());
}

#[test]
fn custom_tables_drive_expansion() {
	let mut synonyms = BTreeMap::new();

	synonyms.insert("rust".to_string(), vec!["cargo".to_string()]);

	let lexicon = Lexicon::new(
		"priya",
		&["she".to_string()],
		&["does".to_string()],
		&synonyms,
		RetrievalWeights::default(),
	)
	.expect("Failed to build lexicon.");
	let retriever = Retriever::new(lexicon, 3);
	let chunks = ["Priya maintains cargo plugins", "Priya likes tea"];
	let result = retriever.retrieve("Does she know rust", &chunks).expect("Retrieval failed.");

	assert_eq!(result, ["Priya maintains cargo plugins"]);
}

#[test]
fn works_with_chunker_output() {
	let text = "Aman has 3 years experience in React.js. ".repeat(3) + &"Aman likes hiking. ".repeat(10);
	let chunks = vitae_chunking::split_text(&text, 40);
	let result = retriever(3).retrieve("hiking", &chunks).expect("Retrieval failed.");

	assert!(!result.is_empty());
	assert!(result.iter().all(|text| text.to_lowercase().contains("hiking")));
}

#[test]
fn self_introduction_falls_back_to_subject_name() {
	let chunks = [
		"Hobbies: chess and long walks",
		"Aman Verma — React.js developer, 3 years experience, email: a@x.com",
	];
	let retriever = retriever(3);

	for question in ["Introduce yourself", "Tell me about yourself"] {
		let ranked = retriever.rank(question, &chunks).expect("Retrieval failed.");

		assert_eq!(ranked.pass, Some("broad"), "question: {question}");
		assert_eq!(ranked.chunks.len(), 1, "question: {question}");
		assert_eq!(ranked.chunks[0].index, 1, "question: {question}");
	}

	let result = retriever.retrieve("Introduce yourself", &chunks).expect("Retrieval failed.");

	assert_eq!(result, [chunks[1]]);
}
