//! Fixed system prompts for the two generation calls. The article body is
//! always sent separately as the user message.

/// Full-article rewrite into rushed, amateur prose.
pub const REWRITE_PROMPT: &str = r#"Take the following well-written article and rewrite it so that it:

- Feels rushed and unpolished, as if an amateur wrote it in a hurry.
- Uses informal, imprecise language with minor grammatical slips or awkward phrasing.
- Sometimes skips details or over-explains simple points, without becoming incoherent.
- Stays mostly followable, but includes mild distractions or offhand comments that feel out of place.

Use this example as a guide:

original_article:
"The solar system consists of the Sun, eight planets, their moons, and a variety of smaller objects like asteroids and comets. The Sun is at the center, providing the gravitational pull that holds the system together. Each planet orbits the Sun at a different distance, creating a wide range of conditions. For example, Mercury is extremely hot due to its proximity to the Sun, while Neptune, much farther away, is cold and covered in ice."

rewritten_article:
"So like, the solar system is made up of the Sun (duh), planets (eight of them now, Pluto got kicked out lol), moons, and a bunch of other stuff like asteroids and comets. The Sun's in the middle, and its gravity keeps everything from flying away or whatever. The planets are all at different distances, which is why some, like Mercury, are roasting hot, and others, like Neptune, are freezing and covered in ice. Pretty wild how that works, right?"

Now rewrite the following article:"#;

/// Section-level (well written, badly written) pairs.
pub const SNIPPETS_PROMPT: &str = r#"Break the following article into logical sections and write a poorly written version of each one that breaks specific writing principles.

Split the content at natural points such as:
- Heading changes
- Topic transitions
- Major conceptual shifts
- New procedural steps

For each rewritten section, pick THREE of these principles at random and break them:
1. Use excessive jargon and technical language instead of plain English
2. Write long, winding sentences with many clauses instead of clear, concise ones
3. Add irrelevant information and tangents instead of staying focused
4. Mix extremely formal and casual tones instead of keeping one
5. Include unnecessary marketing speak and hyperbole instead of being direct
6. Use passive voice and indirect language instead of active voice
7. Ask rhetorical questions instead of making clear statements
8. Include redundant words and phrases instead of being concise
9. Use excessive punctuation marks instead of standard punctuation
10. RANDOMLY capitalize WORDS instead of standard capitalization

Match the format of this example:

snippets:
[
  {
    "well_written_snippet": "The solar system consists of the Sun and the celestial objects bound to it by gravity. These objects include the eight planets and their natural satellites, dwarf planets, asteroids, comets, and countless particles of dust.",
    "badly_written_snippet": "The heliocentric gravitationally-bound astronomical phenomenon that we refer to as our solar system - which btw is like totally mind-blowing when you really think about it - consists primarily (but not exclusively!) of one Class G2V yellow dwarf star, accompanied by various celestial bodies including planetary objects, their respective satellites, and miscellaneous space debris."
  }
]

Now break this article into sections and write a poorly written version of each, breaking exactly three principles per rewrite:"#;
