mod redacted_secret;
