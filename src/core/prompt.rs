//! Prompt templates sent to the model. Pure string building, no IO.

/// Transcripts are embedded into prompts up to this many characters; anything
/// beyond is dropped without warning.
pub const MAX_TRANSCRIPT_CHARS: usize = 50_000;

/// Fixed sentence the model is told to emit when the transcript does not
/// contain the answer.
pub const FALLBACK_SENTENCE: &str = "This topic wasn't covered in the video.";

pub const SYSTEM_PROMPT: &str =
    "You are a helpful assistant. A user has watched a YouTube video and wants \
     to ask questions about it.";

/// First `MAX_TRANSCRIPT_CHARS` characters of the transcript, cut on a char
/// boundary.
pub fn truncate_transcript(transcript: &str) -> &str {
    match transcript.char_indices().nth(MAX_TRANSCRIPT_CHARS) {
        Some((byte_index, _)) => &transcript[..byte_index],
        None => transcript,
    }
}

/// Question-answering prompt: the model must answer from the transcript alone
/// and fall back to a fixed sentence otherwise.
pub fn question_prompt(transcript: &str, question: &str) -> String {
    let transcript = truncate_transcript(transcript);
    format!(
        "Here is the full transcript of the video:\n\
         ---\n\
         {transcript}\n\
         ---\n\
         \n\
         Answer the following question based ONLY on the transcript above.\n\
         If the answer is not in the transcript, say \"{FALLBACK_SENTENCE}\"\n\
         Be clear, concise and helpful in your response.\n\
         \n\
         Question: {question}"
    )
}

/// Summarization prompt: short overview, five key points, main takeaway.
pub fn summary_prompt(transcript: &str) -> String {
    let transcript = truncate_transcript(transcript);
    format!(
        "Summarize the following YouTube video transcript.\n\
         \n\
         Transcript:\n\
         ---\n\
         {transcript}\n\
         ---\n\
         \n\
         Provide:\n\
         1. A 3-4 line overall summary\n\
         2. 5 key points from the video\n\
         3. Main takeaway or conclusion\n\
         \n\
         Keep it clear and concise."
    )
}

#[cfg(test)]
mod tests {
    use super::{
        FALLBACK_SENTENCE, MAX_TRANSCRIPT_CHARS, question_prompt, summary_prompt,
        truncate_transcript,
    };

    #[test]
    fn short_transcripts_are_untouched() {
        assert_eq!(truncate_transcript("hello world"), "hello world");
    }

    #[test]
    fn long_transcripts_are_cut_to_the_limit() {
        let long = "a".repeat(MAX_TRANSCRIPT_CHARS + 1000);
        let cut = truncate_transcript(&long);
        assert_eq!(cut.chars().count(), MAX_TRANSCRIPT_CHARS);
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        // Multibyte characters must not be split mid-codepoint.
        let long = "é".repeat(MAX_TRANSCRIPT_CHARS + 10);
        let cut = truncate_transcript(&long);
        assert_eq!(cut.chars().count(), MAX_TRANSCRIPT_CHARS);
        assert!(long.is_char_boundary(cut.len()));
    }

    #[test]
    fn question_prompt_embeds_question_and_fallback() {
        let prompt = question_prompt("some transcript", "What is discussed?");
        assert!(prompt.contains("some transcript"));
        assert!(prompt.contains("Question: What is discussed?"));
        assert!(prompt.contains(FALLBACK_SENTENCE));
        assert!(prompt.contains("based ONLY on the transcript"));
    }

    #[test]
    fn prompts_never_exceed_transcript_budget() {
        let long = "word ".repeat(MAX_TRANSCRIPT_CHARS);
        for prompt in [
            question_prompt(&long, "q"),
            summary_prompt(&long),
        ] {
            // Template overhead is small; the embedded transcript dominates.
            assert!(prompt.chars().count() < MAX_TRANSCRIPT_CHARS + 1000);
        }
    }

    #[test]
    fn summary_prompt_requests_the_fixed_structure() {
        let prompt = summary_prompt("t");
        assert!(prompt.contains("3-4 line overall summary"));
        assert!(prompt.contains("5 key points"));
        assert!(prompt.contains("Main takeaway"));
    }
}
